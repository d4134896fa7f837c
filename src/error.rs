//! Error types for manifest server operations

use crate::format::OutputFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the strict (`try_*`) client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, malformed response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Manifest document is not valid YAML
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Response or manifest is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file could not be read or written
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Converter answered with an empty document
    #[error("server returned no {0} output")]
    EmptyOutput(OutputFormat),

    /// Format name outside html/react/vue/php
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Document parsed but is not a manifest mapping
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

impl ClientError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
