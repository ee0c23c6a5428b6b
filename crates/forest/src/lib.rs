//! Regression trees and bagged random forests.
//!
//! Features are passed as row-major flat slices with an explicit
//! `n_features`, the same layout used by `flowcast-scale`.
//!
//! | Type | Role |
//! |------|------|
//! | [`TreeConfig`] | depth and leaf-size limits, per-split feature sampling |
//! | [`ForestConfig`] | tree count, bootstrap flag, seed |
//! | [`RegressionTree`] | CART tree with variance-reduction splits |
//! | [`RandomForest`] | mean of independently grown trees |
//!
//! Trees are grown in parallel with rayon. Every tree owns an RNG seeded
//! from the forest seed and its index, so fitting is deterministic.

mod config;
mod error;
mod forest;
mod table;
mod tree;

pub use config::{ForestConfig, TreeConfig};
pub use error::ForestError;
pub use forest::RandomForest;
pub use tree::RegressionTree;
