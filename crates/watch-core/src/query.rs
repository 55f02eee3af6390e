//! What the watcher is looking for.

use serde::{Deserialize, Serialize};
use travis_api::RepoSlug;

/// Repository plus the commit whose build should be watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildQuery {
    pub repo: RepoSlug,
    pub commit_sha: String,
}

impl BuildQuery {
    pub fn new(repo: RepoSlug, commit_sha: impl Into<String>) -> Self {
        Self {
            repo,
            commit_sha: commit_sha.into(),
        }
    }

    /// Short form of the commit (first 8 chars), for logs.
    pub fn short_sha(&self) -> &str {
        &self.commit_sha[..8.min(self.commit_sha.len())]
    }
}
