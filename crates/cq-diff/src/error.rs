//! Error types for the diff crate.
//!
//! Comparing two texts never fails; these errors come from resolving which
//! snippet versions to compare.

use cq_types::SnippetId;

/// Errors that can occur when selecting snippet versions to diff.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The snippet has no version with the requested number.
    #[error("snippet {snippet} has no version {version}")]
    VersionNotFound { snippet: SnippetId, version: u32 },

    /// A "latest changes" diff needs a previous version to compare against.
    #[error("snippet {snippet} has {count} version(s), need at least 2")]
    NotEnoughVersions { snippet: SnippetId, count: usize },
}
