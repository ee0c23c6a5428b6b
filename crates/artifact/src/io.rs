//! Staged JSON writes and paired reads.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ArtifactError;
use crate::paths::ArtifactPaths;

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

fn temp_sibling(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn backup_sibling(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

/// Serialises `value` into a temporary file next to `path` and returns it.
fn stage<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf, ArtifactError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ArtifactError::io(parent, e))?;
    }
    let bytes = serde_json::to_vec(value).map_err(|e| ArtifactError::serde(path, e))?;
    let tmp = temp_sibling(path);
    fs::write(&tmp, bytes).map_err(|e| ArtifactError::io(&tmp, e))?;
    Ok(tmp)
}

fn discard(tmp: &Path) {
    let _ = fs::remove_file(tmp);
}

/// Writes one JSON artifact, replacing `path` atomically.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let tmp = stage(path, value)?;
    fs::rename(&tmp, path).map_err(|e| {
        discard(&tmp);
        ArtifactError::io(path, e)
    })
}

/// Reads one JSON artifact.
///
/// # Errors
///
/// [`ArtifactError::NotFound`] if `path` is not a file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.is_file() {
        return Err(ArtifactError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::serde(path, e))
}

/// Writes a model and its scaler.
///
/// Both files are fully written to temporary siblings before either is
/// renamed into place. A previous model is moved to a `.bak` sibling while
/// the scaler is swapped in and restored if that fails, so on error the
/// previous pair (or no pair) is left on disk.
pub fn save_pair<M, S>(paths: &ArtifactPaths, model: &M, scaler: &S) -> Result<(), ArtifactError>
where
    M: Serialize + ?Sized,
    S: Serialize + ?Sized,
{
    let model_tmp = stage(paths.model(), model)?;
    let scaler_tmp = match stage(paths.scaler(), scaler) {
        Ok(tmp) => tmp,
        Err(e) => {
            discard(&model_tmp);
            return Err(e);
        }
    };

    let backup = backup_sibling(paths.model());
    let had_model = paths.model().is_file();
    if had_model {
        if let Err(e) = fs::rename(paths.model(), &backup) {
            discard(&model_tmp);
            discard(&scaler_tmp);
            return Err(ArtifactError::io(paths.model(), e));
        }
    }
    let rollback = || {
        if had_model {
            let _ = fs::rename(&backup, paths.model());
        } else {
            discard(paths.model());
        }
    };

    if let Err(e) = fs::rename(&model_tmp, paths.model()) {
        discard(&model_tmp);
        discard(&scaler_tmp);
        rollback();
        return Err(ArtifactError::io(paths.model(), e));
    }
    if let Err(e) = fs::rename(&scaler_tmp, paths.scaler()) {
        discard(&scaler_tmp);
        rollback();
        warn!(
            scaler = %paths.scaler().display(),
            "scaler swap failed, model rolled back"
        );
        return Err(ArtifactError::io(paths.scaler(), e));
    }
    if had_model {
        discard(&backup);
    }
    debug!(
        model = %paths.model().display(),
        scaler = %paths.scaler().display(),
        "wrote artifact pair"
    );
    Ok(())
}

/// Reads a model and its scaler.
///
/// Both files must exist before either is decoded.
pub fn load_pair<M, S>(paths: &ArtifactPaths) -> Result<(M, S), ArtifactError>
where
    M: DeserializeOwned,
    S: DeserializeOwned,
{
    for path in [paths.model(), paths.scaler()] {
        if !path.is_file() {
            return Err(ArtifactError::NotFound {
                path: path.to_path_buf(),
            });
        }
    }
    Ok((read_json(paths.model())?, read_json(paths.scaler())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_sibling_appends_suffix() {
        assert_eq!(
            temp_sibling(Path::new("dir/model.json")),
            PathBuf::from("dir/model.json.tmp")
        );
    }

    #[test]
    fn backup_sibling_appends_suffix() {
        assert_eq!(
            backup_sibling(Path::new("dir/model.json")),
            PathBuf::from("dir/model.json.bak")
        );
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("values.json");
        write_json(&path, &vec![1.5, 2.5]).unwrap();
        assert!(!temp_sibling(&path).exists());
        let back: Vec<f64> = read_json(&path).unwrap();
        assert_eq!(back, vec![1.5, 2.5]);
    }

    #[test]
    fn corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"{not json").unwrap();
        let err = read_json::<Vec<f64>>(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Serialization { .. }));
    }
}
