//! Input/label pairs over a contiguous series.

use crate::error::WindowError;

/// Fixed-length input windows paired with their next-value labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Windows {
    /// Observations backing every window, in temporal order.
    series: Vec<f64>,
    window_len: usize,
}

impl Windows {
    /// Builds the windows of length `window_len` over `series`.
    ///
    /// A series with `series.len() <= window_len` yields zero windows.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ZeroLength`] if `window_len == 0`.
    pub fn new(series: &[f64], window_len: usize) -> Result<Self, WindowError> {
        if window_len == 0 {
            return Err(WindowError::ZeroLength);
        }
        Ok(Self {
            series: series.to_vec(),
            window_len,
        })
    }

    /// Number of (window, label) pairs: `max(0, N - L)`.
    pub fn len(&self) -> usize {
        self.series.len().saturating_sub(self.window_len)
    }

    /// Returns `true` when there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length `L` of every window.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// The observations the windows are drawn from.
    pub fn series(&self) -> &[f64] {
        &self.series
    }

    /// Input window `i`: `series[i .. i + L]`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn window(&self, i: usize) -> &[f64] {
        assert!(i < self.len(), "window index {i} out of range");
        &self.series[i..i + self.window_len]
    }

    /// Label of window `i`: `series[i + L]`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn label(&self, i: usize) -> f64 {
        assert!(i < self.len(), "label index {i} out of range");
        self.series[i + self.window_len]
    }

    /// All labels in window order.
    pub fn labels(&self) -> &[f64] {
        if self.is_empty() {
            return &[];
        }
        &self.series[self.window_len..]
    }

    /// Iterates `(window, label)` pairs in temporal order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&[f64], f64)> + '_ {
        (0..self.len()).map(move |i| (self.window(i), self.label(i)))
    }

    /// Splits into windows `[0, index)` and `[index, len)`.
    ///
    /// `index` is clamped to `len()`. Both halves keep the window length.
    pub fn split_at(&self, index: usize) -> (Windows, Windows) {
        let index = index.min(self.len());
        let head_end = (index + self.window_len).min(self.series.len());
        let head = if index == 0 {
            Vec::new()
        } else {
            self.series[..head_end].to_vec()
        };
        let tail = if index == self.len() {
            Vec::new()
        } else {
            self.series[index..].to_vec()
        };
        (
            Windows {
                series: head,
                window_len: self.window_len,
            },
            Windows {
                series: tail,
                window_len: self.window_len,
            },
        )
    }

    /// Splits off the trailing `floor(len * fraction)` windows.
    ///
    /// Returns `(leading, trailing)`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidFraction`] if `fraction` is outside `[0, 1]`.
    pub fn split_fraction(&self, fraction: f64) -> Result<(Windows, Windows), WindowError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(WindowError::InvalidFraction { fraction });
        }
        let n_tail = (self.len() as f64 * fraction).floor() as usize;
        Ok(self.split_at(self.len() - n_tail))
    }
}
