use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use cq_diff::{diff_latest, diff_versions, SnippetDiff};
use cq_types::Snippet;

use crate::cli::*;
use crate::config::CliConfig;
use crate::render::{render_json, render_text, RenderOptions};

const STDIN_PATH: &str = "-";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = CliConfig::load(cli.config.as_deref(), &cwd)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Diff(args) => {
            let changes_only = args.changes_only;
            let view = cmd_diff(args)?;
            emit(&mut out, &view, &cli.format, &config, cli.no_color, changes_only)
        }
        Command::Versions(args) => {
            let changes_only = args.changes_only;
            let view = cmd_versions(args)?;
            emit(&mut out, &view, &cli.format, &config, cli.no_color, changes_only)
        }
        Command::Config => {
            let text = toml::to_string_pretty(&config).context("cannot serialize config")?;
            write!(out, "{text}")?;
            Ok(())
        }
    }
}

fn emit(
    out: &mut impl Write,
    view: &SnippetDiff,
    format: &OutputFormat,
    config: &CliConfig,
    no_color: bool,
    changes_only: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let opts = RenderOptions::from_config(config, no_color, changes_only);
            render_text(out, view, &opts)?;
        }
        OutputFormat::Json => render_json(out, view)?,
    }
    Ok(())
}

/// Read a side of the diff. Invalid UTF-8 is replaced with U+FFFD rather
/// than rejected.
fn read_input(path: &Path) -> anyhow::Result<String> {
    let bytes = if path == Path::new(STDIN_PATH) {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("cannot read stdin")?;
        bytes
    } else {
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn display_name(path: &Path) -> String {
    if path == Path::new(STDIN_PATH) {
        return "stdin".into();
    }
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Guess a language label from the file extension.
fn language_for(path: &Path) -> String {
    let label = match path.extension().and_then(|e| e.to_str()) {
        Some("rs") => "rust",
        Some("py") => "python",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("ts" | "tsx") => "typescript",
        Some("go") => "go",
        Some("java") => "java",
        Some("rb") => "ruby",
        Some("c" | "h") => "c",
        Some("cpp" | "cc" | "hpp") => "cpp",
        Some("sh") => "bash",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("md") => "markdown",
        _ => "text",
    };
    label.to_string()
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<SnippetDiff> {
    if args.old == Path::new(STDIN_PATH) && args.new == Path::new(STDIN_PATH) {
        bail!("only one side of the diff may be read from stdin");
    }
    let old = read_input(&args.old)?;
    let new = read_input(&args.new)?;

    let title = args.title.unwrap_or_else(|| {
        format!("{} → {}", display_name(&args.old), display_name(&args.new))
    });
    let language = args.language.unwrap_or_else(|| {
        let labelled = if args.new == Path::new(STDIN_PATH) { &args.old } else { &args.new };
        language_for(labelled)
    });

    tracing::debug!(old = %args.old.display(), new = %args.new.display(), "diffing files");
    Ok(SnippetDiff::from_texts(title, language, &old, &new))
}

fn load_snippet(path: &Path) -> anyhow::Result<Snippet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read snippet {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid snippet export {}", path.display()))
}

fn cmd_versions(args: VersionsArgs) -> anyhow::Result<SnippetDiff> {
    let snippet = load_snippet(&args.snippet)?;
    let view = match (args.from, args.to) {
        (None, None) => diff_latest(&snippet)?,
        (from, to) => {
            let latest = snippet
                .latest()
                .map(|v| v.number)
                .with_context(|| format!("snippet {} has no versions", snippet.id))?;
            let to = to.unwrap_or(latest);
            let from = from.unwrap_or_else(|| to.saturating_sub(1).max(1));
            diff_versions(&snippet, from, to)?
        }
    };
    Ok(view)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_snippet(dir: &Path) -> PathBuf {
        let mut s = Snippet::new("hello", "rust", "fn main() {}\n");
        s.push_version("fn main() {\n    println!(\"hi\");\n}\n", None).unwrap();
        s.push_version("fn main() {\n    println!(\"hello\");\n}\n", None).unwrap();
        let path = dir.join("snippet.json");
        std::fs::write(&path, serde_json::to_string(&s).unwrap()).unwrap();
        path
    }

    #[test]
    fn diff_files() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.py");
        let new = dir.path().join("new.py");
        std::fs::write(&old, "a\nb\nc").unwrap();
        std::fs::write(&new, "a\nZ\nc").unwrap();

        let view = cmd_diff(DiffArgs {
            old,
            new,
            title: None,
            language: None,
            changes_only: false,
        })
        .unwrap();
        assert_eq!(view.title, "old.py → new.py");
        assert_eq!(view.language, "python");
        assert_eq!(view.diff.count_added(), 1);
        assert_eq!(view.diff.count_removed(), 1);
        assert_eq!(view.diff.count_unchanged(), 2);
    }

    #[test]
    fn diff_files_with_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.bin");
        let new = dir.path().join("new.bin");
        std::fs::write(&old, b"same\n\xff\xfe").unwrap();
        std::fs::write(&new, b"same\nok").unwrap();

        let view = cmd_diff(DiffArgs {
            old,
            new,
            title: None,
            language: None,
            changes_only: false,
        })
        .unwrap();
        assert_eq!(view.diff.count_unchanged(), 1);
        assert_eq!(view.diff.lines()[1].content(), "\u{fffd}\u{fffd}");
        assert_eq!(view.diff.lines()[2].content(), "ok");
    }

    #[test]
    fn diff_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = cmd_diff(DiffArgs {
            old: dir.path().join("nope"),
            new: dir.path().join("nope2"),
            title: None,
            language: None,
            changes_only: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn diff_rejects_double_stdin() {
        let result = cmd_diff(DiffArgs {
            old: STDIN_PATH.into(),
            new: STDIN_PATH.into(),
            title: None,
            language: None,
            changes_only: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn versions_default_to_latest_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snippet(dir.path());
        let view = cmd_versions(VersionsArgs { snippet: path, from: None, to: None, changes_only: false }).unwrap();
        assert_eq!(view.from_version, Some(2));
        assert_eq!(view.to_version, Some(3));
        assert_eq!(view.diff.count_removed(), 1);
        assert_eq!(view.diff.count_added(), 1);
    }

    #[test]
    fn versions_explicit_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snippet(dir.path());
        let view = cmd_versions(VersionsArgs { snippet: path, from: Some(1), to: Some(3), changes_only: false }).unwrap();
        assert_eq!(view.from_version, Some(1));
        assert_eq!(view.to_version, Some(3));
        assert_eq!(view.title, "hello");
        assert_eq!(view.language, "rust");
    }

    #[test]
    fn versions_only_to_compares_with_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snippet(dir.path());
        let view = cmd_versions(VersionsArgs { snippet: path, from: None, to: Some(2), changes_only: false }).unwrap();
        assert_eq!(view.from_version, Some(1));
        assert_eq!(view.to_version, Some(2));
    }

    #[test]
    fn versions_unknown_version_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snippet(dir.path());
        let result = cmd_versions(VersionsArgs { snippet: path, from: Some(1), to: Some(7), changes_only: false });
        assert!(result.is_err());
    }

    #[test]
    fn versions_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let result = cmd_versions(VersionsArgs { snippet: path, from: None, to: None, changes_only: false });
        assert!(result.is_err());
    }

    #[test]
    fn language_guess_falls_back_to_text() {
        assert_eq!(language_for(Path::new("main.rs")), "rust");
        assert_eq!(language_for(Path::new("app.tsx")), "typescript");
        assert_eq!(language_for(Path::new("README")), "text");
    }

    #[test]
    fn emit_json_and_text() {
        let view = SnippetDiff::from_texts("t", "text", "a", "b");
        let config = CliConfig::default();
        let mut text = Vec::new();
        emit(&mut text, &view, &OutputFormat::Text, &config, true, false).unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.contains("1 - a"));
        assert!(text.contains("1 + b"));

        let mut json = Vec::new();
        emit(&mut json, &view, &OutputFormat::Json, &config, true, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["diff"]["removed"], 1);
    }
}
