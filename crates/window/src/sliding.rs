//! Fixed-length sliding buffer for autoregressive loops.

use crate::error::WindowError;

/// A fixed-length window that slides forward one value at a time.
///
/// Backed by a doubled ring buffer: every value is written at `head` and at
/// `head + len`, so the current window is always the contiguous slice
/// `buf[head .. head + len]`. [`SlidingWindow::push`] is O(1) and
/// [`SlidingWindow::as_slice`] never allocates.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    buf: Vec<f64>,
    head: usize,
    len: usize,
}

impl SlidingWindow {
    /// Creates a window holding `initial`, oldest value first.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ZeroLength`] if `initial` is empty.
    pub fn new(initial: &[f64]) -> Result<Self, WindowError> {
        if initial.is_empty() {
            return Err(WindowError::ZeroLength);
        }
        let len = initial.len();
        let mut buf = Vec::with_capacity(2 * len);
        buf.extend_from_slice(initial);
        buf.extend_from_slice(initial);
        Ok(Self { buf, head: 0, len })
    }

    /// Drops the oldest value and appends `value` as the newest.
    pub fn push(&mut self, value: f64) {
        self.buf[self.head] = value;
        self.buf[self.head + self.len] = value;
        self.head = (self.head + 1) % self.len;
    }

    /// The current window, oldest value first.
    pub fn as_slice(&self) -> &[f64] {
        &self.buf[self.head..self.head + self.len]
    }

    /// Window length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a sliding window holds at least one value.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            SlidingWindow::new(&[]),
            Err(WindowError::ZeroLength)
        ));
    }

    #[test]
    fn push_slides_left() {
        let mut w = SlidingWindow::new(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(w.as_slice(), &[1.0, 2.0, 3.0]);
        w.push(4.0);
        assert_eq!(w.as_slice(), &[2.0, 3.0, 4.0]);
        w.push(5.0);
        w.push(6.0);
        assert_eq!(w.as_slice(), &[4.0, 5.0, 6.0]);
        w.push(7.0);
        assert_eq!(w.as_slice(), &[5.0, 6.0, 7.0]);
    }

    #[test]
    fn matches_naive_roll() {
        let initial: Vec<f64> = (0..5).map(f64::from).collect();
        let mut w = SlidingWindow::new(&initial).unwrap();
        let mut naive = initial.clone();
        for step in 0..23 {
            let v = 100.0 + step as f64;
            w.push(v);
            naive.remove(0);
            naive.push(v);
            assert_eq!(w.as_slice(), naive.as_slice(), "step {step}");
        }
    }

    #[test]
    fn length_one() {
        let mut w = SlidingWindow::new(&[9.0]).unwrap();
        w.push(1.0);
        assert_eq!(w.as_slice(), &[1.0]);
        assert_eq!(w.len(), 1);
    }
}
