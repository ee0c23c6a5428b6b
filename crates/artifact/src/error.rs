//! Error types for the flowcast-artifact crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the flowcast-artifact crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    /// Returned when an artifact file does not exist.
    #[error("artifact not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Wraps a filesystem failure.
    #[error("I/O error on {}: {message}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        message: String,
    },

    /// Wraps a JSON encoding or decoding failure.
    #[error("serialization error in {}: {message}", path.display())]
    Serialization {
        /// File being encoded or decoded.
        path: PathBuf,
        /// Description of the underlying failure.
        message: String,
    },
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: e.to_string(),
        }
    }

    pub(crate) fn serde(path: impl Into<PathBuf>, e: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_not_found() {
        let e = ArtifactError::NotFound {
            path: PathBuf::from("models/a.json"),
        };
        assert_eq!(e.to_string(), "artifact not found: models/a.json");
    }

    #[test]
    fn error_serialization() {
        let e = ArtifactError::Serialization {
            path: PathBuf::from("s.json"),
            message: "EOF while parsing".to_string(),
        };
        assert_eq!(e.to_string(), "serialization error in s.json: EOF while parsing");
    }
}
