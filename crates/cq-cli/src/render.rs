use std::io::{self, Write};

use colored::Colorize;
use cq_diff::{DiffKind, DiffLine, SnippetDiff};

use crate::config::CliConfig;

/// Text rendering options, resolved from config and flags.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub color: bool,
    pub show_header: bool,
    pub show_summary: bool,
    pub line_number_width: usize,
    pub changes_only: bool,
}

impl RenderOptions {
    pub fn from_config(config: &CliConfig, no_color: bool, changes_only: bool) -> Self {
        Self {
            color: config.color && !no_color,
            show_header: config.show_header,
            show_summary: config.show_summary,
            line_number_width: config.line_number_width,
            changes_only,
        }
    }
}

fn marker(kind: DiffKind) -> char {
    match kind {
        DiffKind::Added => '+',
        DiffKind::Removed => '-',
        DiffKind::Unchanged => ' ',
    }
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

fn render_line(out: &mut impl Write, line: &DiffLine, width: usize, color: bool) -> io::Result<()> {
    let row = format!(
        "{:>width$} {} {}",
        line.line_number(),
        marker(line.kind()),
        line.content()
    );
    if !color {
        return writeln!(out, "{row}");
    }
    match line.kind() {
        DiffKind::Added => writeln!(out, "{}", row.green()),
        DiffKind::Removed => writeln!(out, "{}", row.red()),
        DiffKind::Unchanged => writeln!(out, "{row}"),
    }
}

/// Render a diff as numbered, marked rows with an optional header and summary.
pub fn render_text(out: &mut impl Write, view: &SnippetDiff, opts: &RenderOptions) -> io::Result<()> {
    if opts.show_header {
        let versions = match (view.from_version, view.to_version) {
            (Some(from), Some(to)) => format!(" (v{from} → v{to})"),
            _ => String::new(),
        };
        let header = format!("{}{versions}", view.title);
        if opts.color {
            writeln!(out, "{} [{}]", header.bold(), view.language.cyan())?;
        } else {
            writeln!(out, "{header} [{}]", view.language)?;
        }
    }

    let max_number = view.diff.lines().last().map_or(0, DiffLine::line_number);
    let width = opts.line_number_width.max(digits(max_number));
    for line in &view.diff {
        if opts.changes_only && line.kind() == DiffKind::Unchanged {
            continue;
        }
        render_line(out, line, width, opts.color)?;
    }

    if opts.show_summary {
        let (added, removed, unchanged) = (
            format!("{} added", view.diff.count_added()),
            format!("{} removed", view.diff.count_removed()),
            format!("{} unchanged", view.diff.count_unchanged()),
        );
        if opts.color {
            writeln!(out, "{}, {}, {}", added.green(), removed.red(), unchanged.dimmed())?;
        } else {
            writeln!(out, "{added}, {removed}, {unchanged}")?;
        }
    }
    Ok(())
}

pub fn render_json(out: &mut impl Write, view: &SnippetDiff) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, view)?;
    writeln!(out)
}
