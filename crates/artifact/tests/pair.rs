use std::fs;

use flowcast_artifact::{ArtifactError, ArtifactPaths, load_pair, save_pair};

#[test]
fn pair_round_trip_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path().join("models"), "demo");

    save_pair(&paths, &vec![1.0, 2.0], &"first").unwrap();
    save_pair(&paths, &vec![0.1, f64::MAX], &"second").unwrap();

    let (model, scaler): (Vec<f64>, String) = load_pair(&paths).unwrap();
    assert_eq!(model, vec![0.1, f64::MAX]);
    assert_eq!(scaler, "second");

    let mut names: Vec<String> = fs::read_dir(dir.path().join("models"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["demo_model.json", "demo_scaler.json"]);
}

#[test]
fn load_requires_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path(), "demo");

    let err = load_pair::<Vec<f64>, String>(&paths).unwrap_err();
    assert_eq!(
        err,
        ArtifactError::NotFound {
            path: paths.model().to_path_buf()
        }
    );

    save_pair(&paths, &vec![1.0], &"s").unwrap();
    fs::remove_file(paths.scaler()).unwrap();
    let err = load_pair::<Vec<f64>, String>(&paths).unwrap_err();
    assert_eq!(
        err,
        ArtifactError::NotFound {
            path: paths.scaler().to_path_buf()
        }
    );
}

fn blocked_scaler(paths: &ArtifactPaths) {
    // A non-empty directory cannot be replaced by a file rename.
    let _ = fs::remove_file(paths.scaler());
    fs::create_dir_all(paths.scaler()).unwrap();
    fs::write(paths.scaler().join("keep"), b"x").unwrap();
}

fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn failed_scaler_swap_restores_previous_model() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path(), "demo");
    save_pair(&paths, &vec![1.0, 2.0], &"first").unwrap();
    let before = fs::read(paths.model()).unwrap();

    blocked_scaler(&paths);
    let err = save_pair(&paths, &vec![9.0, 9.0, 9.0], &"second").unwrap_err();
    assert!(matches!(err, ArtifactError::Io { ref path, .. } if path == paths.scaler()));

    assert_eq!(fs::read(paths.model()).unwrap(), before);
    assert_eq!(file_names(dir.path()), ["demo_model.json", "demo_scaler.json"]);
}

#[test]
fn failed_first_save_leaves_no_model() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path(), "demo");

    blocked_scaler(&paths);
    assert!(save_pair(&paths, &vec![1.0], &"s").is_err());
    assert!(!paths.model().exists());
    assert_eq!(file_names(dir.path()), ["demo_scaler.json"]);
}
