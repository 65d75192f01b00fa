//! Positional line diff.
//!
//! Lines are compared by index, not by content similarity: line `i` of the
//! old text is only ever compared with line `i` of the new text. An insertion
//! in the middle of a file therefore shows every following line as a
//! removed/added pair. Callers rely on this exact output shape.

use serde::Serialize;

/// Classification of a line relative to the two compared texts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present only in the new text at this position.
    Added,
    /// Present only in the old text at this position.
    Removed,
    /// Identical in both texts at this position.
    Unchanged,
}

/// A single line of diff output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    kind: DiffKind,
    content: String,
    line_number: usize,
}

impl DiffLine {
    fn new(kind: DiffKind, content: &str, line_number: usize) -> Self {
        Self {
            kind,
            content: content.to_string(),
            line_number,
        }
    }

    pub fn kind(&self) -> DiffKind {
        self.kind
    }

    /// The line's text, without its newline. May be empty.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// 1-based position shared by both texts. A modified line emits two
    /// records with the same number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// The ordered output of [`compute_diff`] plus per-kind counts.
///
/// Lines appear in emission order, which is ascending position with a
/// removed record before its added counterpart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    lines: Vec<DiffLine>,
    added: usize,
    removed: usize,
    unchanged: usize,
}

impl DiffResult {
    fn from_lines(lines: Vec<DiffLine>) -> Self {
        let mut result = Self {
            lines,
            added: 0,
            removed: 0,
            unchanged: 0,
        };
        for line in &result.lines {
            match line.kind {
                DiffKind::Added => result.added += 1,
                DiffKind::Removed => result.removed += 1,
                DiffKind::Unchanged => result.unchanged += 1,
            }
        }
        result
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffLine> {
        self.lines.iter()
    }

    pub fn count_added(&self) -> usize {
        self.added
    }

    pub fn count_removed(&self) -> usize {
        self.removed
    }

    pub fn count_unchanged(&self) -> usize {
        self.unchanged
    }

    /// Total number of records, equal to the sum of the three counts.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if nothing was added or removed.
    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a DiffLine;
    type IntoIter = std::slice::Iter<'a, DiffLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Split on `'\n'`. A trailing newline yields a trailing empty line, but an
/// empty text has no lines at all.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Compare `old_text` against `new_text` position by position.
///
/// For each index up to the longer line count:
/// - old exhausted: one `Added` record;
/// - new exhausted: one `Removed` record;
/// - equal lines: one `Unchanged` record;
/// - different lines: a `Removed` record followed by an `Added` record,
///   both carrying the same line number.
///
/// Total over all inputs; never fails.
pub fn compute_diff(old_text: &str, new_text: &str) -> DiffResult {
    let old_lines = split_lines(old_text);
    let new_lines = split_lines(new_text);
    let max_lines = old_lines.len().max(new_lines.len());

    let mut lines = Vec::with_capacity(max_lines);
    for i in 0..max_lines {
        let line_number = i + 1;
        match (old_lines.get(i), new_lines.get(i)) {
            (None, Some(new)) => lines.push(DiffLine::new(DiffKind::Added, new, line_number)),
            (Some(old), None) => lines.push(DiffLine::new(DiffKind::Removed, old, line_number)),
            (Some(old), Some(new)) if old == new => {
                lines.push(DiffLine::new(DiffKind::Unchanged, old, line_number));
            }
            (Some(old), Some(new)) => {
                lines.push(DiffLine::new(DiffKind::Removed, old, line_number));
                lines.push(DiffLine::new(DiffKind::Added, new, line_number));
            }
            (None, None) => break,
        }
    }

    DiffResult::from_lines(lines)
}
