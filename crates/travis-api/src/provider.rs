//! Provider trait the watcher is written against.
//!
//! The trait is async and backend-agnostic: [`crate::TravisClient`] talks to
//! the real API, [`crate::fakes::ScriptedProvider`] replays canned responses.

use async_trait::async_trait;

use crate::types::{BuildsPage, Job, JobId, RepoSlug};
use crate::Result;

/// Read-only view of a CI provider.
#[async_trait]
pub trait CiProvider: Send + Sync {
    /// Recent builds of a repository together with the commits they reference.
    async fn list_builds(&self, repo: &RepoSlug) -> Result<BuildsPage>;

    /// Current snapshot of a single job.
    async fn fetch_job(&self, job_id: JobId) -> Result<Job>;
}
