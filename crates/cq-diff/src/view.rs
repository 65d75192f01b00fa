//! Version-pair diffs for the snippet viewer.

use cq_types::Snippet;
use serde::Serialize;
use tracing::debug;

use crate::error::DiffError;
use crate::line_diff::{compute_diff, DiffResult};

/// A line diff labelled with what was compared.
///
/// `title` and `language` are passed through from the snippet untouched.
/// Version numbers are absent for ad-hoc diffs of arbitrary texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SnippetDiff {
    pub title: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_version: Option<u32>,
    pub diff: DiffResult,
}

impl SnippetDiff {
    /// Diff two texts that are not stored snippet versions.
    pub fn from_texts(
        title: impl Into<String>,
        language: impl Into<String>,
        old_text: &str,
        new_text: &str,
    ) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            from_version: None,
            to_version: None,
            diff: compute_diff(old_text, new_text),
        }
    }
}

/// Diff version `from` of `snippet` against version `to`.
///
/// `from == to` is allowed and yields an all-unchanged diff.
pub fn diff_versions(snippet: &Snippet, from: u32, to: u32) -> Result<SnippetDiff, DiffError> {
    let lookup = |number: u32| {
        snippet.version(number).ok_or(DiffError::VersionNotFound {
            snippet: snippet.id,
            version: number,
        })
    };
    let old = lookup(from)?;
    let new = lookup(to)?;

    let diff = compute_diff(&old.content, &new.content);
    debug!(
        snippet = %snippet.id,
        from,
        to,
        added = diff.count_added(),
        removed = diff.count_removed(),
        unchanged = diff.count_unchanged(),
        "diffed snippet versions"
    );

    Ok(SnippetDiff {
        title: snippet.title.clone(),
        language: snippet.language.clone(),
        from_version: Some(from),
        to_version: Some(to),
        diff,
    })
}

/// Diff the version before the latest against the latest.
pub fn diff_latest(snippet: &Snippet) -> Result<SnippetDiff, DiffError> {
    let mut numbers: Vec<u32> = snippet.versions.iter().map(|v| v.number).collect();
    numbers.sort_unstable();
    match numbers.as_slice() {
        [.., previous, latest] => diff_versions(snippet, *previous, *latest),
        _ => Err(DiffError::NotEnoughVersions {
            snippet: snippet.id,
            count: numbers.len(),
        }),
    }
}
