use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid snippet id: {0}")]
    InvalidSnippetId(String),

    #[error("version number overflow after version {0}")]
    VersionOverflow(u32),
}
