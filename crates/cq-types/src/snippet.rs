use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Snippet identifier. Fresh ids are UUID v7 so they sort by creation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(uuid::Uuid);

impl SnippetId {
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for SnippetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SnippetId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidSnippetId(format!("{s}: {e}")))
    }
}

/// One numbered revision of a snippet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetVersion {
    /// Version number, starting at 1.
    pub number: u32,
    /// Full text of the snippet at this version.
    pub content: String,
    /// When this version was recorded.
    pub created_at: DateTime<Utc>,
    /// Optional author note describing the revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A code snippet and its version history.
///
/// Versions are kept in ascending `number` order. A snippet always has at
/// least its initial version when built through [`Snippet::new`]; snippets
/// loaded from an export may carry any history the exporter wrote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    /// Language label, e.g. `rust` or `typescript`. Carried through unmodified.
    pub language: String,
    #[serde(default)]
    pub versions: Vec<SnippetVersion>,
}

impl Snippet {
    /// Create a snippet with `initial_content` as version 1.
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        initial_content: impl Into<String>,
    ) -> Self {
        Self {
            id: SnippetId::new(),
            title: title.into(),
            language: language.into(),
            versions: vec![SnippetVersion {
                number: 1,
                content: initial_content.into(),
                created_at: Utc::now(),
                note: None,
            }],
        }
    }

    /// Record a new version and return its number.
    ///
    /// Fails if the latest version number is already `u32::MAX`, which only
    /// happens with hand-edited exports.
    pub fn push_version(
        &mut self,
        content: impl Into<String>,
        note: Option<String>,
    ) -> Result<u32, TypeError> {
        let number = match self.latest() {
            Some(latest) => latest
                .number
                .checked_add(1)
                .ok_or(TypeError::VersionOverflow(latest.number))?,
            None => 1,
        };
        self.versions.push(SnippetVersion {
            number,
            content: content.into(),
            created_at: Utc::now(),
            note,
        });
        Ok(number)
    }

    /// Look up a version by number.
    pub fn version(&self, number: u32) -> Option<&SnippetVersion> {
        self.versions.iter().find(|v| v.number == number)
    }

    /// The highest-numbered version, if any.
    pub fn latest(&self) -> Option<&SnippetVersion> {
        self.versions.iter().max_by_key(|v| v.number)
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }
}
