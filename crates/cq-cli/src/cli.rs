use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "codequest",
    about = "CodeQuest — compare snippet versions line by line",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./codequest.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two files ("-" reads stdin)
    Diff(DiffArgs),
    /// Diff two versions of an exported snippet
    Versions(VersionsArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub language: Option<String>,
    /// Hide unchanged lines
    #[arg(long)]
    pub changes_only: bool,
}

#[derive(Args)]
pub struct VersionsArgs {
    /// Snippet export (JSON)
    pub snippet: PathBuf,
    #[arg(long)]
    pub from: Option<u32>,
    #[arg(long)]
    pub to: Option<u32>,
    #[arg(long)]
    pub changes_only: bool,
}
