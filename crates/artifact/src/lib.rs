//! Paired model/scaler JSON artifacts.
//!
//! A trained predictor is persisted as two JSON files named by an
//! [`ArtifactPaths`]. [`save_pair`] stages both files as `*.tmp` siblings
//! and renames them into place only once both are written, so a reader
//! never observes a half-written file. [`load_pair`] checks that both files
//! exist before decoding either.

mod error;
mod io;
mod lifecycle;
mod paths;

pub use error::ArtifactError;
pub use io::{load_pair, read_json, save_pair, write_json};
pub use lifecycle::Lifecycle;
pub use paths::ArtifactPaths;
