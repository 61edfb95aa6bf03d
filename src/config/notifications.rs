//! Notification store location

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// JSON file holding the notification list
    pub path: PathBuf,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/notifications.json"),
        }
    }
}
