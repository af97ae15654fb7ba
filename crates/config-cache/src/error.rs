//! Error types for config-cache

use std::path::PathBuf;

/// Result type for config-cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Key not found: {path}")]
    NotFound { path: String },

    #[error("Cannot resolve '{segment}' in {path}: parent is not a mapping")]
    NotAMapping { path: String, segment: String },

    #[error("Not a leaf or not {expected}: {path}")]
    InvalidType { path: String, expected: &'static str },

    #[error("Invalid JSON list default for {path}: {message}")]
    InvalidJson { path: String, message: String },

    #[error("Configuration file not found: {path}")]
    Configuration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported structure at {key}: {message}")]
    Structure { key: String, message: String },

    #[error("Unknown parser: {0}")]
    UnknownParser(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(
        path: impl Into<PathBuf>,
        format: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ConfigParse {
            path: path.into(),
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn invalid_type(path: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidType {
            path: path.into(),
            expected,
        }
    }

    pub fn structure(key: &str, message: impl Into<String>) -> Self {
        let key = if key.is_empty() { "<root>" } else { key };
        Self::Structure {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// True for lookup failures that lenient getters turn into defaults.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotAMapping { .. })
    }
}
