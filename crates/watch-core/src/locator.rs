//! Build location.
//!
//! Travis registers a pushed commit, and later a build for it, with some lag.
//! Until both are visible the whole builds list is fetched again. The retry
//! is unbounded and has no backoff: the loop ends only when the build shows
//! up or the provider returns an error.

use tracing::{debug, info};
use travis_api::{Build, CiProvider};

use crate::error::Result;
use crate::query::BuildQuery;

/// Poll the provider until the build for `query.commit_sha` exists.
pub async fn locate_build<P>(provider: &P, query: &BuildQuery) -> Result<Build>
where
    P: CiProvider + ?Sized,
{
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        let page = provider.list_builds(&query.repo).await?;

        match page.commit_by_sha(&query.commit_sha) {
            None => debug!(attempt, sha = query.short_sha(), "commit not registered yet"),
            Some(commit) => match page.build_for_commit(commit.id) {
                Some(build) => {
                    info!(
                        build_id = build.id,
                        jobs = build.job_ids.len(),
                        attempt,
                        "build located"
                    );
                    return Ok(build.clone());
                }
                None => debug!(attempt, commit_id = commit.id, "no build for commit yet"),
            },
        }

        // Not a delay: lets the render timer run between attempts.
        tokio::task::yield_now().await;
    }
}
