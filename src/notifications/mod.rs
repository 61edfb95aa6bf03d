//! File-backed notification list.
//!
//! The whole list lives in one JSON array on disk, newest first. Every
//! mutation reads the file, changes the list in memory and rewrites the whole
//! file. There is no locking: two concurrent mutations can interleave as
//! read-A, read-B, write-A, write-B, in which case A's change is lost.

mod error;
mod types;

pub use error::StoreError;
pub use types::{Notification, NotificationType};

use std::path::{Path, PathBuf};

/// Handle to the notification file. Cheap to clone; holds no cached state.
#[derive(Debug, Clone)]
pub struct NotificationStore {
    path: PathBuf,
}

impl NotificationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All notifications in stored order.
    ///
    /// A missing file is initialized to an empty list. Any other read or
    /// parse failure is returned as an error.
    pub async fn list(&self) -> Result<Vec<Notification>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Initializing notification store");
                self.persist(&[]).await?;
                Ok(Vec::new())
            }
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Prepend a new unread notification and return the updated list.
    ///
    /// The id is one more than the highest stored id, or 1 for an empty store.
    /// `timestamp` defaults to the current UTC time (RFC 3339).
    pub async fn add(
        &self,
        message: impl Into<String>,
        category: NotificationType,
        timestamp: Option<String>,
    ) -> Result<Vec<Notification>, StoreError> {
        let mut notifications = self.list().await?;

        let id = next_id(&notifications).ok_or_else(|| StoreError::IdsExhausted {
            path: self.path.clone(),
        })?;
        notifications.insert(
            0,
            Notification {
                id,
                message: message.into(),
                category,
                timestamp: timestamp.unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
                read: false,
            },
        );

        self.persist(&notifications).await?;
        tracing::debug!(id, category = %category, "Notification added");
        Ok(notifications)
    }

    /// Mark one notification read. Unknown ids leave the list unchanged.
    pub async fn mark_read(&self, id: u64) -> Result<Vec<Notification>, StoreError> {
        let mut notifications = self.list().await?;

        match notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => notification.read = true,
            None => tracing::debug!(id, "mark_read: no notification with this id"),
        }

        self.persist(&notifications).await?;
        Ok(notifications)
    }

    /// Mark every notification read.
    pub async fn mark_all_read(&self) -> Result<Vec<Notification>, StoreError> {
        let mut notifications = self.list().await?;
        for notification in &mut notifications {
            notification.read = true;
        }

        self.persist(&notifications).await?;
        Ok(notifications)
    }

    /// Overwrite the file with the full list.
    async fn persist(&self, notifications: &[Notification]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(notifications).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        tokio::fs::write(&self.path, json).await.map_err(io_err)
    }
}

/// Highest stored id plus one; 1 when empty. `None` once `u64::MAX` is taken.
pub fn next_id(notifications: &[Notification]) -> Option<u64> {
    match notifications.iter().map(|n| n.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
