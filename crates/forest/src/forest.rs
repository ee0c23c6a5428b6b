//! Bagged ensemble of regression trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ForestConfig;
use crate::error::ForestError;
use crate::table::Table;
use crate::tree::RegressionTree;

/// Random forest regressor.
///
/// Each tree is grown on a bootstrap sample of the rows (or all rows when
/// bootstrap is disabled) with an RNG seeded from `seed + tree_index`, so
/// the fitted forest does not depend on rayon's scheduling.
///
/// # Example
///
/// ```
/// use flowcast_forest::{ForestConfig, RandomForest};
///
/// let x: Vec<f64> = (0..50).map(f64::from).collect();
/// let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
///
/// let mut forest = RandomForest::new(ForestConfig::new().with_n_trees(10))?;
/// forest.fit(&x, 1, &y)?;
/// let p = forest.predict(&[25.0])?;
/// assert!((p - 50.0).abs() < 5.0);
/// # Ok::<(), flowcast_forest::ForestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    n_features: Option<usize>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Creates an unfitted forest after validating `config`.
    pub fn new(config: ForestConfig) -> Result<Self, ForestError> {
        config.validate()?;
        Ok(Self {
            config,
            trees: Vec::new(),
            n_features: None,
            importances: Vec::new(),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Whether [`fit`](Self::fit) has completed successfully.
    pub fn is_fitted(&self) -> bool {
        self.n_features.is_some()
    }

    /// Feature count seen during fit.
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    /// Fitted trees.
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Mean of the per-tree normalised impurity decreases. Empty before fit.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    /// Fits the forest on a row-major feature table.
    ///
    /// Replaces any previous fit. On error the forest is left unchanged.
    pub fn fit(
        &mut self,
        features: &[f64],
        n_features: usize,
        targets: &[f64],
    ) -> Result<(), ForestError> {
        let table = Table::new(features, n_features, targets)?;
        let n_rows = table.n_rows();
        let bootstrap = self.config.bootstrap();
        let seed = self.config.seed();
        let tree_config = self.config.tree();

        info!(
            n_trees = self.config.n_trees(),
            n_rows, n_features, "fitting random forest"
        );

        let trees: Vec<RegressionTree> = (0..self.config.n_trees())
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                let rows: Vec<usize> = if bootstrap {
                    (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                RegressionTree::grow(&table, rows, tree_config, &mut rng)
            })
            .collect();

        let mut importances = vec![0.0; n_features];
        for tree in &trees {
            for (acc, v) in importances.iter_mut().zip(tree.feature_importances()) {
                *acc += v;
            }
        }
        let n_trees = trees.len() as f64;
        importances.iter_mut().for_each(|v| *v /= n_trees);

        debug!(
            mean_depth = trees.iter().map(|t| t.depth()).sum::<usize>() as f64 / n_trees,
            "forest grown"
        );

        self.trees = trees;
        self.n_features = Some(n_features);
        self.importances = importances;
        Ok(())
    }

    /// Predicts one row as the mean of the tree outputs.
    pub fn predict(&self, row: &[f64]) -> Result<f64, ForestError> {
        let expected = self.n_features.ok_or(ForestError::NotFitted)?;
        if row.len() != expected {
            return Err(ForestError::FeatureCountMismatch {
                expected,
                got: row.len(),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(ForestError::NonFiniteInput { input: "features" });
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    /// Predicts every row of a row-major feature table.
    pub fn predict_many(&self, features: &[f64]) -> Result<Vec<f64>, ForestError> {
        let n_features = self.n_features.ok_or(ForestError::NotFitted)?;
        if features.len() % n_features != 0 {
            return Err(ForestError::ShapeMismatch {
                len: features.len(),
                n_features,
            });
        }
        features
            .chunks_exact(n_features)
            .map(|row| self.predict(row))
            .collect()
    }

    /// Coefficient of determination on a labelled table.
    pub fn score(&self, features: &[f64], targets: &[f64]) -> Result<f64, ForestError> {
        let n_features = self.n_features.ok_or(ForestError::NotFitted)?;
        let table = Table::new(features, n_features, targets)?;
        let predicted = self.predict_many(features)?;
        let r2 = flowcast_stats::r2(targets, &predicted).ok_or(ForestError::EmptyData)?;
        debug!(rows = table.n_rows(), r2, "scored forest");
        Ok(r2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;

    #[test]
    fn rejects_invalid_config() {
        let err = RandomForest::new(ForestConfig::new().with_n_trees(0)).unwrap_err();
        assert!(matches!(err, ForestError::InvalidConfig { .. }));
    }

    #[test]
    fn predict_before_fit() {
        let forest = RandomForest::new(ForestConfig::new()).unwrap();
        assert_eq!(forest.predict(&[1.0]), Err(ForestError::NotFitted));
        assert!(!forest.is_fitted());
    }

    #[test]
    fn failed_fit_leaves_forest_unchanged() {
        let mut forest = RandomForest::new(ForestConfig::new().with_n_trees(3)).unwrap();
        forest.fit(&[1.0, 2.0, 3.0], 1, &[1.0, 2.0, 3.0]).unwrap();
        let before = forest.clone();

        assert!(forest.fit(&[1.0, f64::NAN], 1, &[1.0, 2.0]).is_err());
        assert_eq!(forest, before);
    }

    #[test]
    fn without_bootstrap_trees_agree() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let config = ForestConfig::new()
            .with_n_trees(4)
            .with_bootstrap(false)
            .with_tree(TreeConfig::new().with_max_depth(2));
        let mut forest = RandomForest::new(config).unwrap();
        forest.fit(&x, 1, &x).unwrap();

        let first = &forest.trees()[0];
        assert!(forest.trees().iter().all(|t| t == first));
    }
}
