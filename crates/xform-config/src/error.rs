//! Error types for xform-config

use std::path::PathBuf;

/// Result type for xform-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering or loading configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read manifest at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Config file does not exist: {path}")]
    ConfigMissing { path: PathBuf },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config script at {path} failed: {detail}")]
    ConfigExec { path: PathBuf, detail: String },

    #[error("Config for '{name}' in {path} must be an object or a file path, found {found}")]
    ConfigShape {
        name: String,
        path: PathBuf,
        found: &'static str,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
