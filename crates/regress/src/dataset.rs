//! Row-major feature table with one target per row.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::RegressError;

/// A validated labelled table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<f64>,
    n_features: usize,
    targets: Vec<f64>,
}

impl Dataset {
    /// Builds a dataset from row-major `features` with `n_features` columns.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::InvalidInput`] if the table is empty, ragged,
    /// has a different number of rows than targets, or holds non-finite values.
    pub fn new(
        features: Vec<f64>,
        n_features: usize,
        targets: Vec<f64>,
    ) -> Result<Self, RegressError> {
        if n_features == 0 {
            return Err(RegressError::invalid("n_features must be at least 1"));
        }
        if features.len() % n_features != 0 {
            return Err(RegressError::invalid(format!(
                "feature length {} is not a multiple of n_features={n_features}",
                features.len()
            )));
        }
        let rows = features.len() / n_features;
        if rows == 0 {
            return Err(RegressError::invalid("dataset has no rows"));
        }
        if rows != targets.len() {
            return Err(RegressError::invalid(format!(
                "{rows} feature rows but {} targets",
                targets.len()
            )));
        }
        if features.iter().chain(&targets).any(|v| !v.is_finite()) {
            return Err(RegressError::invalid("dataset holds non-finite values"));
        }
        Ok(Self {
            features,
            n_features,
            targets,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.targets.len()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Row-major features.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Targets, one per row.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Feature row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.features[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Randomly assigns `ceil(n_rows * test_fraction)` rows to a test set.
    ///
    /// Returns `(train, test)`; rows keep their relative order within each part.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::InvalidInput`] unless `test_fraction` is in
    /// `(0, 1)` and both parts end up non-empty.
    pub fn split_random<R: Rng + ?Sized>(
        &self,
        test_fraction: f64,
        rng: &mut R,
    ) -> Result<(Dataset, Dataset), RegressError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(RegressError::invalid(format!(
                "test_fraction must be in (0, 1), got {test_fraction}"
            )));
        }
        let n = self.n_rows();
        let n_test = (n as f64 * test_fraction).ceil() as usize;
        if n_test >= n {
            return Err(RegressError::invalid(format!(
                "{n} rows are too few to hold out {test_fraction}"
            )));
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        let mut test_rows = order[..n_test].to_vec();
        let mut train_rows = order[n_test..].to_vec();
        test_rows.sort_unstable();
        train_rows.sort_unstable();

        Ok((self.select(&train_rows), self.select(&test_rows)))
    }

    fn select(&self, rows: &[usize]) -> Dataset {
        Dataset {
            features: rows.iter().flat_map(|&i| self.row(i)).copied().collect(),
            n_features: self.n_features,
            targets: rows.iter().map(|&i| self.targets[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table(n: usize) -> Dataset {
        let features = (0..n).flat_map(|i| [i as f64, -(i as f64)]).collect();
        let targets = (0..n).map(|i| 10.0 * i as f64).collect();
        Dataset::new(features, 2, targets).unwrap()
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(Dataset::new(vec![1.0], 0, vec![1.0]).is_err());
        assert!(Dataset::new(vec![1.0, 2.0, 3.0], 2, vec![1.0]).is_err());
        assert!(Dataset::new(vec![], 2, vec![]).is_err());
        assert!(Dataset::new(vec![1.0, 2.0], 2, vec![1.0, 2.0]).is_err());
        assert!(Dataset::new(vec![1.0, 2.0], 2, vec![f64::NAN]).is_err());
    }

    #[test]
    fn rows_are_row_major() {
        let d = table(3);
        assert_eq!(d.n_rows(), 3);
        assert_eq!(d.row(2), &[2.0, -2.0]);
    }

    #[test]
    fn split_partitions_rows() {
        let d = table(10);
        let (train, test) = d.split_random(0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(train.n_rows(), 8);
        assert_eq!(test.n_rows(), 2);

        let mut all: Vec<f64> = train.targets().iter().chain(test.targets()).copied().collect();
        all.sort_by(f64::total_cmp);
        assert_eq!(all, d.targets());

        // rows stay intact
        for i in 0..test.n_rows() {
            assert_eq!(test.row(i)[0] * 10.0, test.targets()[i]);
        }
    }

    #[test]
    fn split_is_seeded() {
        let d = table(50);
        let a = d.split_random(0.3, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = d.split_random(0.3, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn split_rejects_bad_fraction() {
        let d = table(4);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(d.split_random(0.0, &mut rng).is_err());
        assert!(d.split_random(1.0, &mut rng).is_err());
        assert!(table(1).split_random(0.5, &mut rng).is_err());
    }
}
