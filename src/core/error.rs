//! Error types for the hook log bridge
//!
//! None of these cross `Bootstrapper::boot` or a dispatch call; they are
//! turned into diagnostics and safe defaults at that boundary.

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, HookLogError>;

#[derive(Debug, thiserror::Error)]
pub enum HookLogError {
    /// Sink directory could not be created
    #[error("Failed to create log directory '{}': {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sink file could not be opened
    #[error("Failed to open log file '{}': {source}", path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Listener registered after the registry was drained
    #[error("Listener '{listener}' registered after the listener registry was flushed")]
    RegistryFlushed { listener: String },

    /// Unknown level name or code
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Sink writer error
    #[error("Writer error: {0}")]
    Writer(String),
}

impl HookLogError {
    pub fn directory_create(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        HookLogError::DirectoryCreate {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn sink_open(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        HookLogError::SinkOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn registry_flushed(listener: impl Into<String>) -> Self {
        HookLogError::RegistryFlushed {
            listener: listener.into(),
        }
    }

    pub fn invalid_level(level: impl Into<String>) -> Self {
        HookLogError::InvalidLevel(level.into())
    }

    pub fn writer<S: Into<String>>(msg: S) -> Self {
        HookLogError::Writer(msg.into())
    }
}
