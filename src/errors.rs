//! Shared error types for the library
//!
//! Commands wrap these in `anyhow::Error` with extra context; analysis code
//! returns them directly so callers can match on the failure kind.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for pyaudit operations
#[derive(Debug, Error)]
pub enum Error {
    /// Path passed to an analyzer does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parser could not be constructed or produced no tree
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// File extension is not handled by any analyzer
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFile(PathBuf),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Directory walk errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),
}

impl Error {
    /// Create an I/O error with path context
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound(path.as_ref().to_path_buf());
        }
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error for a file
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error means the input simply isn't there
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let err = Error::io(
            "missing.py",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "File not found: missing.py");
    }

    #[test]
    fn test_io_other_kind_keeps_source() {
        let err = Error::io(
            "locked.py",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("I/O error on locked.py"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("bad.py", "no tree produced");
        assert_eq!(err.to_string(), "Parse error in bad.py: no tree produced");
    }
}
