//! Output formatting helpers for CLI commands

use crate::notifications::{Notification, NotificationType};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

/// Probe result for one backend service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatusView {
    pub service: String,
    pub reachable: bool,
    /// Candidate that answered
    pub endpoint: Option<String>,
    /// 1-based position of the answering candidate
    pub attempt: Option<usize>,
    pub candidates: Vec<String>,
    pub error: Option<String>,
}

/// Format service probe results as a table
pub fn format_status_table(services: &[ServiceStatusView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "Status", "Endpoint", "Attempt", "Detail"]);

    for s in services {
        let status_str = if s.reachable {
            "Up".green().to_string()
        } else {
            "Down".red().to_string()
        };
        let attempt = match s.attempt {
            Some(n) => format!("{}/{}", n, s.candidates.len()),
            None => format!("-/{}", s.candidates.len()),
        };

        table.add_row(vec![
            Cell::new(&s.service),
            Cell::new(status_str),
            Cell::new(s.endpoint.as_deref().unwrap_or("-")),
            Cell::new(attempt),
            Cell::new(s.error.as_deref().unwrap_or("")),
        ]);
    }

    table.to_string()
}

/// Format service probe results as JSON
pub fn format_status_json(services: &[ServiceStatusView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "services": services }))
}

fn colored_type(category: NotificationType) -> String {
    let label = category.to_string();
    match category {
        NotificationType::Warning => label.yellow().to_string(),
        NotificationType::Success => label.green().to_string(),
        NotificationType::Error => label.red().to_string(),
        NotificationType::Info => label.cyan().to_string(),
        NotificationType::Debug => label.dimmed().to_string(),
    }
}

/// Format notifications as a table
pub fn format_notifications_table(notifications: &[Notification]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Type", "Message", "Timestamp", "Read"]);

    for n in notifications {
        table.add_row(vec![
            Cell::new(n.id),
            Cell::new(colored_type(n.category)),
            Cell::new(&n.message),
            Cell::new(&n.timestamp),
            Cell::new(if n.read { "✓" } else { "" }),
        ]);
    }

    table.to_string()
}

/// Format notifications as JSON
pub fn format_notifications_json(
    notifications: &[Notification],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "notifications": notifications }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up_view() -> ServiceStatusView {
        ServiceStatusView {
            service: "gateway".to_string(),
            reachable: true,
            endpoint: Some("http://localhost:4000".to_string()),
            attempt: Some(2),
            candidates: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:4000".to_string(),
            ],
            error: None,
        }
    }

    fn notification() -> Notification {
        Notification {
            id: 7,
            message: "disk low".to_string(),
            category: NotificationType::Warning,
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            read: false,
        }
    }

    #[test]
    fn test_format_status_table_with_data() {
        let output = format_status_table(&[up_view()]);
        assert!(output.contains("Service"));
        assert!(output.contains("gateway"));
        assert!(output.contains("http://localhost:4000"));
        assert!(output.contains("2/2"));
    }

    #[test]
    fn test_format_status_json_valid() {
        let output = format_status_json(&[up_view()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["services"][0]["reachable"], true);
        assert_eq!(parsed["services"][0]["attempt"], 2);
    }

    #[test]
    fn test_format_notifications_table_empty() {
        let output = format_notifications_table(&[]);
        assert!(output.contains("Message"));
    }

    #[test]
    fn test_format_notifications_json_uses_type_field() {
        let output = format_notifications_json(&[notification()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["notifications"][0]["type"], "warning");
        assert_eq!(parsed["notifications"][0]["id"], 7);
    }
}
