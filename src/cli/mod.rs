//! CLI module for the dashboard server
//!
//! # Commands
//!
//! - `serve` - Start the dashboard server
//! - `status` - Probe the backend services once and report which endpoint answered
//! - `notify` - Inspect or change the notification store (list, add, read, read-all)
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server under a base path
//! ario-admin serve --base-path /admin
//!
//! # Check which candidate endpoints answer
//! ario-admin status --json
//!
//! # Generate shell completions
//! ario-admin completions bash > ~/.bash_completion.d/ario-admin
//! ```

pub mod completions;
pub mod config;
pub mod notify;
pub mod output;
pub mod serve;
pub mod status;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::{AdminConfig, ConfigError};
use crate::notifications::NotificationType;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "ario-admin.toml";

/// AR.IO gateway admin dashboard
#[derive(Parser, Debug)]
#[command(
    name = "ario-admin",
    version,
    about = "Admin dashboard and API proxy for AR.IO gateway nodes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server
    Serve(ServeArgs),
    /// Probe backend services
    Status(StatusArgs),
    /// Manage dashboard notifications
    #[command(subcommand)]
    Notify(NotifyCommands),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, env = "ARIO_ADMIN_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Serve everything under this URL prefix (e.g. /admin)
    #[arg(long)]
    pub base_path: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommands {
    /// List stored notifications
    List(NotifyListArgs),
    /// Add a notification
    Add(NotifyAddArgs),
    /// Mark one notification read
    Read(NotifyReadArgs),
    /// Mark every notification read
    ReadAll(NotifyStoreArgs),
}

#[derive(Args, Debug)]
pub struct NotifyStoreArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct NotifyListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub store: NotifyStoreArgs,
}

#[derive(Args, Debug)]
pub struct NotifyAddArgs {
    /// Notification text
    pub message: String,

    /// Notification type (warning, success, error, info, debug)
    #[arg(short = 't', long = "type", default_value = "info")]
    pub category: NotificationType,

    #[command(flatten)]
    pub store: NotifyStoreArgs,
}

#[derive(Args, Debug)]
pub struct NotifyReadArgs {
    /// Notification id
    pub id: u64,

    #[command(flatten)]
    pub store: NotifyStoreArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load the config file if it exists, otherwise defaults, then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<AdminConfig, ConfigError> {
    let config = if path.exists() {
        AdminConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        AdminConfig::default()
    };
    Ok(config.with_env_overrides())
}
