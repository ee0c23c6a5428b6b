//! Model/scaler path pair.

use std::path::{Path, PathBuf};

/// Locations of the paired model and scaler artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    model: PathBuf,
    scaler: PathBuf,
}

impl ArtifactPaths {
    /// Creates a pair of artifact paths.
    pub fn new(model: impl Into<PathBuf>, scaler: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            scaler: scaler.into(),
        }
    }

    /// `<dir>/<stem>_model.json` and `<dir>/<stem>_scaler.json`.
    pub fn in_dir(dir: impl AsRef<Path>, stem: &str) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(format!("{stem}_model.json")),
            dir.join(format!("{stem}_scaler.json")),
        )
    }

    /// Model artifact path.
    pub fn model(&self) -> &Path {
        &self.model
    }

    /// Scaler artifact path.
    pub fn scaler(&self) -> &Path {
        &self.scaler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_names() {
        let p = ArtifactPaths::in_dir("out", "traffic");
        assert_eq!(p.model(), Path::new("out/traffic_model.json"));
        assert_eq!(p.scaler(), Path::new("out/traffic_scaler.json"));
    }
}
