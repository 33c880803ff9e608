//! Error and warning types for scanning operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that stop a scan before any work begins.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root was empty.
    #[error("Full path can not be empty")]
    EmptyRoot,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Path vanished or never existed.
    NotFound,
    /// Any other error reading a directory.
    ReadError,
}

/// Non-fatal warning encountered during a scan.
///
/// Each warning marks a subtree whose contents are missing from the totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied accessing {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }

    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            std::io::ErrorKind::NotFound => Self {
                message: format!("Not found: {}", path.display()),
                path,
                kind: WarningKind::NotFound,
            },
            _ => Self {
                message: format!("Error accessing {}: {error}", path.display()),
                path,
                kind: WarningKind::ReadError,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_permission_denied() {
        let warning = ScanWarning::from_io(
            "/test/path",
            &std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("/test/path"));
    }

    #[test]
    fn test_from_io_other() {
        let warning = ScanWarning::from_io("/x", &std::io::Error::other("disk on fire"));
        assert_eq!(warning.kind, WarningKind::ReadError);
        assert!(warning.message.contains("disk on fire"));
    }
}
