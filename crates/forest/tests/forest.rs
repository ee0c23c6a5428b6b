use approx::assert_relative_eq;
use flowcast_forest::{ForestConfig, ForestError, RandomForest, TreeConfig};

/// y = 10 * x0 + noise-free step on x1; x2 is irrelevant.
fn table(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut features = Vec::with_capacity(n * 3);
    let mut targets = Vec::with_capacity(n);
    for i in 0..n {
        let x0 = (i % 10) as f64;
        let x1 = if i % 7 < 3 { 0.0 } else { 1.0 };
        let x2 = ((i * 31) % 17) as f64;
        features.extend([x0, x1, x2]);
        targets.push(10.0 * x0 + 40.0 * x1);
    }
    (features, targets)
}

#[test]
fn fits_a_deterministic_function() {
    let (x, y) = table(300);
    let mut forest = RandomForest::new(ForestConfig::new().with_n_trees(30)).unwrap();
    forest.fit(&x, 3, &y).unwrap();

    let r2 = forest.score(&x, &y).unwrap();
    assert!(r2 > 0.95, "r2 = {r2}");

    let p = forest.predict(&[5.0, 1.0, 3.0]).unwrap();
    assert!((p - 90.0).abs() < 10.0, "p = {p}");
}

#[test]
fn importances_favour_signal_features() {
    let (x, y) = table(300);
    let mut forest = RandomForest::new(ForestConfig::new().with_n_trees(20)).unwrap();
    forest.fit(&x, 3, &y).unwrap();

    let imp = forest.feature_importances();
    assert_eq!(imp.len(), 3);
    assert_relative_eq!(imp.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    assert!(imp[2] < imp[0]);
    assert!(imp[2] < imp[1]);
}

#[test]
fn same_seed_same_forest() {
    let (x, y) = table(120);
    let config = ForestConfig::new()
        .with_n_trees(8)
        .with_tree(TreeConfig::new().with_max_features(Some(2)))
        .with_seed(9);

    let mut a = RandomForest::new(config.clone()).unwrap();
    let mut b = RandomForest::new(config).unwrap();
    a.fit(&x, 3, &y).unwrap();
    b.fit(&x, 3, &y).unwrap();

    assert_eq!(a, b);
    assert_eq!(
        a.predict(&[2.0, 0.0, 1.0]).unwrap(),
        b.predict(&[2.0, 0.0, 1.0]).unwrap()
    );
}

#[test]
fn different_seeds_differ() {
    let (x, y) = table(120);
    let mut a = RandomForest::new(ForestConfig::new().with_n_trees(5).with_seed(1)).unwrap();
    let mut b = RandomForest::new(ForestConfig::new().with_n_trees(5).with_seed(2)).unwrap();
    a.fit(&x, 3, &y).unwrap();
    b.fit(&x, 3, &y).unwrap();
    assert_ne!(a.trees(), b.trees());
}

#[test]
fn predict_validates_rows() {
    let (x, y) = table(50);
    let mut forest = RandomForest::new(ForestConfig::new().with_n_trees(3)).unwrap();
    forest.fit(&x, 3, &y).unwrap();

    assert_eq!(
        forest.predict(&[1.0, 2.0]),
        Err(ForestError::FeatureCountMismatch {
            expected: 3,
            got: 2
        })
    );
    assert_eq!(
        forest.predict(&[1.0, f64::INFINITY, 0.0]),
        Err(ForestError::NonFiniteInput { input: "features" })
    );
    assert_eq!(
        forest.predict_many(&[1.0, 2.0, 3.0, 4.0]),
        Err(ForestError::ShapeMismatch {
            len: 4,
            n_features: 3
        })
    );
}

#[test]
fn fit_rejects_mismatched_targets() {
    let mut forest = RandomForest::new(ForestConfig::new()).unwrap();
    assert_eq!(
        forest.fit(&[1.0, 2.0, 3.0], 1, &[1.0]),
        Err(ForestError::TargetCountMismatch {
            rows: 3,
            targets: 1
        })
    );
    assert!(!forest.is_fitted());
}
