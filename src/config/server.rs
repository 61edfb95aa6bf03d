//! Server configuration

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// URL prefix the dashboard is deployed under (e.g. "/admin"). Empty for root.
    pub base_path: String,
    /// Timeout for forwarded admin calls
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3100,
            base_path: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

impl ServerConfig {
    /// Cookie path for the session token: the base path, or "/" at the root.
    pub fn cookie_path(&self) -> &str {
        if self.base_path.is_empty() {
            "/"
        } else {
            &self.base_path
        }
    }

    /// URL of the dashboard root.
    pub fn root_url(&self) -> &str {
        self.cookie_path()
    }

    /// Join a route onto the base path.
    pub fn url_for(&self, route: &str) -> String {
        format!("{}{}", self.base_path, route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3100);
        assert!(config.base_path.is_empty());
        assert_eq!(config.request_timeout_seconds, 30);
    }

    #[test]
    fn test_cookie_path_root() {
        let config = ServerConfig::default();
        assert_eq!(config.cookie_path(), "/");
        assert_eq!(config.url_for("/login"), "/login");
    }

    #[test]
    fn test_cookie_path_with_base_path() {
        let config = ServerConfig {
            base_path: "/admin".to_string(),
            ..Default::default()
        };
        assert_eq!(config.cookie_path(), "/admin");
        assert_eq!(config.url_for("/login"), "/admin/login");
    }
}
