//! Configuration module for the admin dashboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ADMIN_*`, `AUTH_SECRET`, `BASE_PATH`, `ARIO_ADMIN_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use ario_admin::config::AdminConfig;
//!
//! let config = AdminConfig::default();
//! assert_eq!(config.server.port, 3100);
//!
//! let toml = r#"
//! [server]
//! port = 9000
//! base_path = "/admin"
//! "#;
//! let config: AdminConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.base_path, "/admin");
//! ```

pub mod auth;
pub mod error;
pub mod logging;
pub mod notifications;
pub mod server;
pub mod services;

pub use auth::{AdminKeyConfig, AuthConfig};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use notifications::NotificationsConfig;
pub use server::ServerConfig;
pub use services::{ServiceEndpoints, ServicesConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unified configuration for the dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Dashboard sign-in and session settings
    pub auth: AuthConfig,
    /// Gateway admin key exposed to signed-in operators
    pub admin: AdminKeyConfig,
    /// Backend candidate endpoints
    pub services: ServicesConfig,
    /// Notification storage
    pub notifications: NotificationsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Read the first non-empty variable among `names`.
fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

impl AdminConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Credentials and secrets
        if let Some(key) = env_first(&["ADMIN_API_KEY"]) {
            self.admin.api_key = Some(key);
        }
        if let Some(username) = env_first(&["ADMIN_USERNAME"]) {
            self.auth.username = Some(username);
        }
        if let Some(password) = env_first(&["ADMIN_PASSWORD"]) {
            self.auth.password = Some(password);
        }
        if let Some(secret) = env_first(&["AUTH_SECRET", "NEXTAUTH_SECRET"]) {
            self.auth.secret = Some(secret);
        }
        if let Some(base_path) = env_first(&["BASE_PATH", "NEXT_PUBLIC_BASE_PATH"]) {
            self.server.base_path = base_path;
        }

        // Server settings
        if let Ok(port) = std::env::var("ARIO_ADMIN_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("ARIO_ADMIN_HOST") {
            self.server.host = host;
        }

        // Logging settings
        if let Ok(level) = std::env::var("ARIO_ADMIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ARIO_ADMIN_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(path) = std::env::var("ARIO_ADMIN_NOTIFICATIONS_PATH") {
            self.notifications.path = PathBuf::from(path);
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        let base_path = &self.server.base_path;
        if !base_path.is_empty() && (!base_path.starts_with('/') || base_path.ends_with('/')) {
            return Err(ConfigError::Validation {
                field: "server.base_path".to_string(),
                message: format!(
                    "'{}' must start with '/' and must not end with '/'",
                    base_path
                ),
            });
        }

        if let Some(c) = base_path
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || "/-_.~".contains(*c)))
        {
            return Err(ConfigError::Validation {
                field: "server.base_path".to_string(),
                message: format!("'{}' contains unsupported character '{}'", base_path, c),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "server.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        for (name, service) in self.services.iter() {
            if service.candidates.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("services.{}.candidates", name),
                    message: "at least one candidate URL is required".to_string(),
                });
            }
            if let Some(i) = service.candidates.iter().position(|c| c.trim().is_empty()) {
                return Err(ConfigError::Validation {
                    field: format!("services.{}.candidates[{}]", name, i),
                    message: "URL cannot be empty".to_string(),
                });
            }
            if service.timeout_seconds == 0 {
                return Err(ConfigError::Validation {
                    field: format!("services.{}.timeout_seconds", name),
                    message: "timeout must be non-zero".to_string(),
                });
            }
        }

        if self.notifications.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "notifications.path".to_string(),
                message: "path cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    // Env var tests mutate process-global state
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_admin_config_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.server.port, 3100);
        assert!(config.admin.api_key.is_none());
        assert_eq!(
            config.notifications.path,
            PathBuf::from("data/notifications.json")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_example_toml() {
        let toml = include_str!("../../ario-admin.example.toml");
        let config: AdminConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.services.ao_cu.candidates.len(), 4);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let config = AdminConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = AdminConfig::load(Some(Path::new("/nonexistent/ario-admin.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server\nport = ").unwrap();

        let result = AdminConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_env_overrides_credentials() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ADMIN_API_KEY", "key-from-env");
        std::env::set_var("ADMIN_USERNAME", "admin");
        std::env::set_var("ADMIN_PASSWORD", "pw");
        std::env::set_var("NEXTAUTH_SECRET", "legacy-secret");
        let config = AdminConfig::default().with_env_overrides();
        std::env::remove_var("ADMIN_API_KEY");
        std::env::remove_var("ADMIN_USERNAME");
        std::env::remove_var("ADMIN_PASSWORD");
        std::env::remove_var("NEXTAUTH_SECRET");

        assert_eq!(config.admin.api_key.as_deref(), Some("key-from-env"));
        assert_eq!(config.auth.username.as_deref(), Some("admin"));
        assert_eq!(config.auth.password.as_deref(), Some("pw"));
        assert_eq!(config.auth.secret.as_deref(), Some("legacy-secret"));
    }

    #[test]
    fn test_config_env_auth_secret_wins_over_alias() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("AUTH_SECRET", "primary");
        std::env::set_var("NEXTAUTH_SECRET", "alias");
        let config = AdminConfig::default().with_env_overrides();
        std::env::remove_var("AUTH_SECRET");
        std::env::remove_var("NEXTAUTH_SECRET");

        assert_eq!(config.auth.secret.as_deref(), Some("primary"));
    }

    #[test]
    fn test_config_env_base_path() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("BASE_PATH", "/dashboard");
        let config = AdminConfig::default().with_env_overrides();
        std::env::remove_var("BASE_PATH");

        assert_eq!(config.server.base_path, "/dashboard");
    }

    #[test]
    fn test_config_env_invalid_port_ignored() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ARIO_ADMIN_PORT", "not-a-number");
        let config = AdminConfig::default().with_env_overrides();
        std::env::remove_var("ARIO_ADMIN_PORT");

        assert_eq!(config.server.port, 3100);
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = AdminConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_config_validation_base_path_shape() {
        for bad in ["admin", "/admin/", "/ad\"min", "/a b"] {
            let mut config = AdminConfig::default();
            config.server.base_path = bad.to_string();
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::Validation { ref field, .. }) if field == "server.base_path"
                ),
                "expected '{}' to be rejected",
                bad
            );
        }

        let mut config = AdminConfig::default();
        config.server.base_path = "/admin".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_candidates() {
        let mut config = AdminConfig::default();
        config.services.observer.candidates.clear();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "services.observer.candidates"
        ));
    }

    #[test]
    fn test_config_validation_zero_probe_timeout() {
        let mut config = AdminConfig::default();
        config.services.gateway.timeout_seconds = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field.contains("timeout")
        ));
    }
}
