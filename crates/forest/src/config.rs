//! Tree and forest configuration.

use serde::{Deserialize, Serialize};

use crate::error::ForestError;

/// Growth limits for a single regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    max_depth: usize,
    min_samples_split: usize,
    min_samples_leaf: usize,
    /// Features tried per split; `None` tries every feature.
    max_features: Option<usize>,
}

impl TreeConfig {
    /// Defaults: `max_depth = 10`, `min_samples_split = 2`,
    /// `min_samples_leaf = 1`, `max_features = None`.
    pub fn new() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }

    /// Sets the maximum depth (root has depth 0).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the minimum node size eligible for splitting.
    pub fn with_min_samples_split(mut self, n: usize) -> Self {
        self.min_samples_split = n;
        self
    }

    /// Sets the minimum number of samples in each child.
    pub fn with_min_samples_leaf(mut self, n: usize) -> Self {
        self.min_samples_leaf = n;
        self
    }

    /// Sets the number of features sampled per split.
    pub fn with_max_features(mut self, n: Option<usize>) -> Self {
        self.max_features = n;
        self
    }

    /// Returns the maximum depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the minimum node size eligible for splitting.
    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    /// Returns the minimum child size.
    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    /// Returns the per-split feature budget.
    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ForestError> {
        if self.min_samples_split < 2 {
            return Err(ForestError::InvalidConfig {
                reason: "min_samples_split must be at least 2".to_string(),
            });
        }
        if self.min_samples_leaf < 1 {
            return Err(ForestError::InvalidConfig {
                reason: "min_samples_leaf must be at least 1".to_string(),
            });
        }
        if self.max_features == Some(0) {
            return Err(ForestError::InvalidConfig {
                reason: "max_features must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a [`RandomForest`](crate::RandomForest).
///
/// # Example
///
/// ```
/// use flowcast_forest::{ForestConfig, TreeConfig};
///
/// let config = ForestConfig::new()
///     .with_n_trees(20)
///     .with_tree(TreeConfig::new().with_max_depth(6))
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    n_trees: usize,
    tree: TreeConfig,
    bootstrap: bool,
    seed: u64,
}

impl ForestConfig {
    /// Defaults: 100 trees of depth at most 10, bootstrap sampling, seed 42.
    pub fn new() -> Self {
        Self {
            n_trees: 100,
            tree: TreeConfig::new(),
            bootstrap: true,
            seed: 42,
        }
    }

    /// Sets the number of trees.
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Sets the per-tree growth limits.
    pub fn with_tree(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    /// Enables or disables bootstrap sampling of rows per tree.
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Sets the forest seed; tree `i` uses `seed + i`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the number of trees.
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Returns the per-tree growth limits.
    pub fn tree(&self) -> &TreeConfig {
        &self.tree
    }

    /// Returns whether rows are bootstrap-sampled.
    pub fn bootstrap(&self) -> bool {
        self.bootstrap
    }

    /// Returns the forest seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ForestError> {
        if self.n_trees == 0 {
            return Err(ForestError::InvalidConfig {
                reason: "n_trees must be at least 1".to_string(),
            });
        }
        self.tree.validate()
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self::new()
    }
}
