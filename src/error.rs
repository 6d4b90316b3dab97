use std::path::PathBuf;

/// Errors raised by the storage, transfer and configuration layers.
///
/// The record store's public `load`/`save` never surface these; they are
/// logged and collapsed into an empty list or `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for fallible tracker operations.
pub type Result<T> = std::result::Result<T, Error>;
