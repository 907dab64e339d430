// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for a synchronization run

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop discovery, resolution, loading or merging.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Bad root, bad language list, unreadable config file
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Discovery found more files than the configured cap
    #[error("Exceeded maximum file exploration size of {limit}. Stopped program")]
    LimitExceeded { limit: usize },

    /// A path that must be a directory exists as something else
    #[error("Invalid directory: {}", path.display())]
    InvalidDirectory { path: PathBuf },

    /// An expected document is not on disk
    #[error("Can't read file {}", path.display())]
    MissingFile { path: PathBuf },

    /// Document content is not a JSON object
    #[error("Can't parse file {language} - {}: {reason}", path.display())]
    MalformedDocument {
        language: String,
        path: PathBuf,
        reason: String,
    },

    /// Requested language is not one of the configured targets
    #[error("Invalid language supplied: {language}")]
    InvalidLanguage { language: String },

    /// A file system primitive failed
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walk could not read an entry
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SyncError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(
        language: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedDocument {
            language: language.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for SyncError
pub type Result<T> = std::result::Result<T, SyncError>;
