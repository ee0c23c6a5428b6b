//! Supervised windowing of ordered time series.
//!
//! [`Windows`] turns a series of `N` observations into `N - L` pairs of a
//! length-`L` input window and the observation that follows it:
//!
//! ```text
//! series:  x0 x1 x2 x3 x4 x5
//! L = 3:   [x0 x1 x2] -> x3
//!             [x1 x2 x3] -> x4
//!                [x2 x3 x4] -> x5
//! ```
//!
//! Windows are views into one owned copy of the series, so building them is
//! O(N) in memory regardless of `L`. Temporal order is preserved and nothing
//! is shuffled; [`Windows::split_at`] and [`Windows::split_fraction`] cut
//! contiguously, which keeps hold-out sets strictly after the training part.
//!
//! [`SlidingWindow`] is the fixed-length buffer used for autoregressive
//! forecasting: each step drops the oldest value and appends a new one.
//!
//! # Quick start
//!
//! ```
//! use flowcast_window::Windows;
//!
//! let w = Windows::new(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
//! assert_eq!(w.len(), 2);
//! assert_eq!(w.window(0), &[1.0, 2.0, 3.0]);
//! assert_eq!(w.label(1), 5.0);
//! ```

mod error;
mod sliding;
mod windows;

pub use error::WindowError;
pub use sliding::SlidingWindow;
pub use windows::Windows;
