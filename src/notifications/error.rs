//! Notification store errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access notification store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("notification store {path} is not a valid notification list: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("notification store {path} has no ids left")]
    IdsExhausted { path: PathBuf },
}
