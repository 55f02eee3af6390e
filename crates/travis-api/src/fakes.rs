//! In-memory fakes for the provider trait (testing only)
//!
//! [`ScriptedProvider`] replays a queue of build pages and a per-job queue of
//! snapshots. The last entry of each queue repeats once the queue is drained,
//! so a job scripted to end `passed` stays `passed`.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::provider::CiProvider;
use crate::types::{BuildsPage, Job, JobId, RepoSlug};
use crate::Result;

/// One scripted provider answer.
#[derive(Debug, Clone)]
enum Reply<T> {
    Ok(T),
    Err(String),
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Err(msg) => Err(ApiError::Http(msg.clone())),
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    pages: VecDeque<Reply<BuildsPage>>,
    jobs: HashMap<JobId, VecDeque<Reply<Job>>>,
    list_calls: usize,
    job_calls: HashMap<JobId, usize>,
}

/// Provider that answers from a script and counts calls.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<Script>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next `list_builds` call.
    pub fn push_page(self, page: BuildsPage) -> Self {
        self.script.lock().unwrap().pages.push_back(Reply::Ok(page));
        self
    }

    /// Queue a transport failure for the next `list_builds` call.
    pub fn push_page_error(self, msg: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .pages
            .push_back(Reply::Err(msg.to_string()));
        self
    }

    /// Queue successive snapshots for a job.
    pub fn push_job_states(self, snapshots: impl IntoIterator<Item = Job>) -> Self {
        {
            let mut script = self.script.lock().unwrap();
            for job in snapshots {
                script
                    .jobs
                    .entry(job.id)
                    .or_default()
                    .push_back(Reply::Ok(job));
            }
        }
        self
    }

    /// Queue a transport failure for the next fetch of `job_id`.
    pub fn push_job_error(self, job_id: JobId, msg: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .jobs
            .entry(job_id)
            .or_default()
            .push_back(Reply::Err(msg.to_string()));
        self
    }

    /// Number of `list_builds` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.script.lock().unwrap().list_calls
    }

    /// Number of `fetch_job` calls served for `job_id`.
    pub fn job_calls(&self, job_id: JobId) -> usize {
        self.script
            .lock()
            .unwrap()
            .job_calls
            .get(&job_id)
            .copied()
            .unwrap_or(0)
    }
}

fn next_reply<T: Clone>(queue: &mut VecDeque<Reply<T>>) -> Option<Reply<T>> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[async_trait]
impl CiProvider for ScriptedProvider {
    async fn list_builds(&self, _repo: &RepoSlug) -> Result<BuildsPage> {
        let mut script = self.script.lock().unwrap();
        script.list_calls += 1;
        match next_reply(&mut script.pages) {
            Some(reply) => reply.to_result(),
            None => Ok(BuildsPage::default()),
        }
    }

    async fn fetch_job(&self, job_id: JobId) -> Result<Job> {
        let mut script = self.script.lock().unwrap();
        *script.job_calls.entry(job_id).or_default() += 1;
        let reply = script.jobs.get_mut(&job_id).and_then(next_reply);
        match reply {
            Some(reply) => reply.to_result(),
            None => Err(ApiError::Status {
                status: 404,
                url: format!("fake://jobs/{job_id}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobState;

    #[tokio::test]
    async fn test_last_job_snapshot_repeats() {
        let provider = ScriptedProvider::new().push_job_states([
            Job::new(1, JobState::Started, "linux", "6"),
            Job::new(1, JobState::Passed, "linux", "6"),
        ]);

        assert_eq!(provider.fetch_job(1).await.unwrap().state, JobState::Started);
        assert_eq!(provider.fetch_job(1).await.unwrap().state, JobState::Passed);
        assert_eq!(provider.fetch_job(1).await.unwrap().state, JobState::Passed);
        assert_eq!(provider.job_calls(1), 3);
    }

    #[tokio::test]
    async fn test_unscripted_job_is_not_found() {
        let provider = ScriptedProvider::new();
        let err = provider.fetch_job(99).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_empty_script_serves_empty_page() {
        let provider = ScriptedProvider::new();
        let page = provider
            .list_builds(&RepoSlug::new("u", "p"))
            .await
            .unwrap();
        assert!(page.builds.is_empty());
        assert_eq!(provider.list_calls(), 1);
    }
}
