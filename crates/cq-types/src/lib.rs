//! Foundation types for CodeQuest.
//!
//! Snippets are stored by an external data-access layer; this crate defines
//! the values that layer hands to the rest of the workspace.
//!
//! # Key Types
//!
//! - [`SnippetId`] — UUID v7 snippet identifier
//! - [`Snippet`] — Titled, language-labelled snippet with its version history
//! - [`SnippetVersion`] — One numbered revision of a snippet's content

pub mod error;
pub mod snippet;

pub use error::TypeError;
pub use snippet::{Snippet, SnippetId, SnippetVersion};
