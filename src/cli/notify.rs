//! Notify command handlers
//!
//! These operate on the notification file directly, so they work whether or
//! not the server is running.

use crate::cli::output::{format_notifications_json, format_notifications_table};
use crate::cli::{NotifyAddArgs, NotifyListArgs};
use crate::notifications::NotificationStore;

/// Handle `ario-admin notify list`
pub async fn handle_notify_list(
    args: &NotifyListArgs,
    store: &NotificationStore,
) -> Result<String, Box<dyn std::error::Error>> {
    let notifications = store.list().await?;
    if args.json {
        Ok(format_notifications_json(&notifications)?)
    } else {
        Ok(format_notifications_table(&notifications))
    }
}

/// Handle `ario-admin notify add`
pub async fn handle_notify_add(
    args: &NotifyAddArgs,
    store: &NotificationStore,
) -> Result<String, Box<dyn std::error::Error>> {
    if args.message.trim().is_empty() {
        return Err("Notification message must not be empty".into());
    }

    let notifications = store.add(args.message.clone(), args.category, None).await?;
    let id = notifications.first().map(|n| n.id).unwrap_or_default();
    Ok(format!("✓ Added {} notification #{}", args.category, id))
}

/// Handle `ario-admin notify read <id>`
pub async fn handle_notify_read(
    id: u64,
    store: &NotificationStore,
) -> Result<String, Box<dyn std::error::Error>> {
    let notifications = store.mark_read(id).await?;
    if notifications.iter().any(|n| n.id == id) {
        Ok(format!("✓ Marked notification #{} read", id))
    } else {
        Err(format!("Notification not found: {}", id).into())
    }
}

/// Handle `ario-admin notify read-all`
pub async fn handle_notify_read_all(
    store: &NotificationStore,
) -> Result<String, Box<dyn std::error::Error>> {
    let notifications = store.mark_all_read().await?;
    Ok(format!("✓ Marked {} notifications read", notifications.len()))
}
