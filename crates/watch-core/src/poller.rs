//! Per-job poll loop.
//!
//! Each job of the located build gets its own loop. Every snapshot fetched is
//! forwarded to the coordinator in fetch order, so the coordinator never
//! overwrites a slot with an older state. `created` and `started` are fetched
//! again immediately; any other state ends the loop.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use travis_api::{CiProvider, Job, JobId};

use crate::error::Result;

/// Poll `job_id` until it leaves `created`/`started`, forwarding every
/// snapshot to `updates`. Returns the final snapshot.
pub async fn poll_job<P>(
    provider: &P,
    job_id: JobId,
    updates: &UnboundedSender<Job>,
) -> Result<Job>
where
    P: CiProvider + ?Sized,
{
    loop {
        let job = provider.fetch_job(job_id).await?;
        debug!(job_id, state = %job.state, "job fetched");

        let pending = job.state.is_pending();
        if updates.send(job.clone()).is_err() {
            // coordinator is gone, nobody left to report to
            return Ok(job);
        }
        if !pending {
            return Ok(job);
        }

        tokio::task::yield_now().await;
    }
}
