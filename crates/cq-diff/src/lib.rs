//! Diff engine for CodeQuest.
//!
//! Compares two texts line by line, aligned by position, producing the
//! records the snippet version viewer renders.
//!
//! # Key Types
//!
//! - [`DiffResult`] / [`DiffLine`] / [`DiffKind`] -- Positional line diff and its counts
//! - [`SnippetDiff`] -- A line diff labelled with the snippet title, language and versions

pub mod error;
pub mod line_diff;
pub mod view;

pub use error::DiffError;
pub use line_diff::{compute_diff, DiffKind, DiffLine, DiffResult};
pub use view::{diff_latest, diff_versions, SnippetDiff};
