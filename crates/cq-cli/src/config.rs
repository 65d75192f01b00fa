use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "codequest.toml";

/// Display settings for rendered diffs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Color added lines green and removed lines red.
    pub color: bool,
    /// Print the added/removed/unchanged counts after the diff.
    pub show_summary: bool,
    /// Print the title and language label before the diff.
    pub show_header: bool,
    /// Minimum width of the line-number column.
    pub line_number_width: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_summary: true,
            show_header: true,
            line_number_width: 4,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl CliConfig {
    /// Load from `explicit` if given, else from [`DEFAULT_CONFIG_FILE`] in
    /// `cwd` if it exists, else defaults. An explicit path must exist.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
