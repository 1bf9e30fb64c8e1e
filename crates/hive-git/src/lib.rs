//! Commit metadata helpers for defaulting schema authorship.
//!
//! Schema checks and publishes record who changed the schema and at which
//! commit. When the caller leaves those fields empty, the SDK falls back to
//! the `HEAD` commit of the repository the provider runs in.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Author and hash of a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Author formatted as `Name <email>`.
    pub author: String,
    /// Full hex object id of the commit.
    pub hash: String,
}

impl CommitInfo {
    /// Construct commit info from an author line and a hash.
    pub fn new(author: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            hash: hash.into(),
        }
    }
}

/// Plain function dependency yielding the latest commit.
///
/// The SDK only calls it when author or commit is missing, and swallows errors.
pub type CommitInfoFn = Arc<dyn Fn() -> Result<CommitInfo> + Send + Sync>;

/// Read the `HEAD` commit of the repository containing `path`.
///
/// Parent directories are searched, so any path inside a work tree works.
pub fn latest_commit_info(path: impl AsRef<Path>) -> Result<CommitInfo> {
    let path = path.as_ref();
    let repo = git2::Repository::discover(path)
        .with_context(|| format!("failed to open repository at {}", path.display()))?;

    let head = repo.head().context("failed to get HEAD reference")?;
    let commit = head
        .peel_to_commit()
        .context("failed to get commit object")?;

    let author = commit.author();
    Ok(CommitInfo {
        author: format!(
            "{} <{}>",
            author.name().unwrap_or_default(),
            author.email().unwrap_or_default()
        ),
        hash: commit.id().to_string(),
    })
}

/// Default collaborator: the repository around the current working directory.
pub fn from_working_directory() -> CommitInfoFn {
    Arc::new(|| latest_commit_info("."))
}

/// Collaborator that always returns the same commit.
pub fn fixed(info: CommitInfo) -> CommitInfoFn {
    Arc::new(move || Ok(info.clone()))
}

/// Collaborator that always fails, as outside of any repository.
pub fn unavailable() -> CommitInfoFn {
    Arc::new(|| Err(anyhow::anyhow!("no repository available")))
}
