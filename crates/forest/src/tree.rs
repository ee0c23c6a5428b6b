//! CART regression tree grown by variance reduction.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::TreeConfig;
use crate::table::Table;

/// Tree node stored in a flat arena; children are arena indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Candidate split of a node.
#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    /// Decrease in summed squared error.
    gain: f64,
}

/// A fitted regression tree. Rows with `x[feature] <= threshold` go left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    /// Normalised impurity decrease per feature.
    importances: Vec<f64>,
}

impl RegressionTree {
    /// Grows a tree on the rows listed in `rows` (duplicates allowed).
    pub(crate) fn grow<R: Rng + ?Sized>(
        table: &Table<'_>,
        mut rows: Vec<usize>,
        config: &TreeConfig,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            importances: vec![0.0; table.n_features()],
        };
        tree.build(table, &mut rows, 0, config, rng);

        let total: f64 = tree.importances.iter().sum();
        if total > 0.0 {
            tree.importances.iter_mut().for_each(|v| *v /= total);
        }
        tree
    }

    fn build<R: Rng + ?Sized>(
        &mut self,
        table: &Table<'_>,
        rows: &mut [usize],
        depth: usize,
        config: &TreeConfig,
        rng: &mut R,
    ) -> usize {
        let n = rows.len();
        let sum: f64 = rows.iter().map(|&r| table.target(r)).sum();
        let sum_sq: f64 = rows.iter().map(|&r| table.target(r).powi(2)).sum();
        let sse = sum_sq - sum * sum / n as f64;

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            value: sum / n as f64,
        });

        if depth >= config.max_depth() || n < config.min_samples_split() || sse <= 1e-12 {
            return id;
        }
        let Some(split) = best_split(table, rows, config, rng) else {
            return id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .partition(|&&r| table.value(r, split.feature) <= split.threshold);
        let mid = left_rows.len();
        rows[..mid].copy_from_slice(&left_rows);
        rows[mid..].copy_from_slice(&right_rows);

        self.importances[split.feature] += split.gain;
        let (l, r) = rows.split_at_mut(mid);
        let left = self.build(table, l, depth + 1, config, rng);
        let right = self.build(table, r, depth + 1, config, rng);

        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Predicts one row. The row must have the fitted number of features.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Per-feature share of total impurity decrease (sums to 1 unless the tree is a stump).
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Depth of the deepest leaf (a single leaf has depth 0).
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}

/// Finds the variance-reducing split with the largest gain.
///
/// Candidate thresholds are midpoints between consecutive distinct values
/// of each sampled feature; splits leaving fewer than `min_samples_leaf`
/// rows on either side are skipped.
fn best_split<R: Rng + ?Sized>(
    table: &Table<'_>,
    rows: &[usize],
    config: &TreeConfig,
    rng: &mut R,
) -> Option<Split> {
    let n = rows.len();
    let n_features = table.n_features();
    let mut features: Vec<usize> = (0..n_features).collect();
    let k = config.max_features().map_or(n_features, |m| m.min(n_features));
    if k < n_features {
        features.shuffle(rng);
        features.truncate(k);
    }

    let sum: f64 = rows.iter().map(|&r| table.target(r)).sum();
    let sum_sq: f64 = rows.iter().map(|&r| table.target(r).powi(2)).sum();
    let parent_sse = sum_sq - sum * sum / n as f64;
    let min_leaf = config.min_samples_leaf();

    let mut best: Option<Split> = None;
    let mut sorted: Vec<(f64, f64)> = Vec::with_capacity(n);
    for feature in features {
        sorted.clear();
        sorted.extend(rows.iter().map(|&r| (table.value(r, feature), table.target(r))));
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 0..n - 1 {
            let (x, y) = sorted[k];
            left_sum += y;
            left_sq += y * y;

            let n_left = k + 1;
            let n_right = n - n_left;
            let next_x = sorted[k + 1].0;
            if n_left < min_leaf || n_right < min_leaf || next_x <= x {
                continue;
            }

            let right_sum = sum - left_sum;
            let right_sq = sum_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / n_left as f64)
                + (right_sq - right_sum * right_sum / n_right as f64);
            let gain = parent_sse - sse;

            if gain > best.map_or(0.0, |b| b.gain) {
                let mid = 0.5 * (x + next_x);
                best = Some(Split {
                    feature,
                    threshold: if mid < next_x { mid } else { x },
                    gain,
                });
            }
        }
    }
    best
}
