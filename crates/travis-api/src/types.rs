//! Travis CI v2 wire types.
//!
//! Only the fields the watcher reads are modelled; everything else in the
//! provider's payloads is ignored by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric job identifier as issued by Travis.
pub type JobId = u64;

/// Operating system Travis assumes when a job config does not name one.
pub const DEFAULT_OS: &str = "linux";

/// `(user, project)` pair identifying a repository on the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    pub user: String,
    pub project: String,
}

impl RepoSlug {
    pub fn new(user: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            project: project.into(),
        }
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.user, self.project)
    }
}

/// Response of `GET /repos/{user}/{project}/builds`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildsPage {
    #[serde(default)]
    pub builds: Vec<Build>,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl BuildsPage {
    /// Commit record whose SHA equals `sha`, if the provider has seen it.
    pub fn commit_by_sha(&self, sha: &str) -> Option<&Commit> {
        self.commits.iter().find(|c| c.sha == sha)
    }

    /// First build that references the given commit record.
    pub fn build_for_commit(&self, commit_id: u64) -> Option<&Build> {
        self.builds.iter().find(|b| b.commit_id == commit_id)
    }
}

/// One build: a full job matrix run against one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: u64,
    pub commit_id: u64,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub job_ids: Vec<JobId>,
}

/// Commit record as known to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: u64,
    pub sha: String,
    #[serde(default)]
    pub branch: Option<String>,
}

/// Job lifecycle state.
///
/// Travis reports more states than the four the watcher distinguishes; any
/// other value is kept verbatim in [`JobState::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    Created,
    Started,
    Passed,
    Failed,
    Other(String),
}

impl JobState {
    pub fn as_str(&self) -> &str {
        match self {
            JobState::Created => "created",
            JobState::Started => "started",
            JobState::Passed => "passed",
            JobState::Failed => "failed",
            JobState::Other(s) => s,
        }
    }

    /// Whether the job must be fetched again.
    ///
    /// Only `created` and `started` keep a job alive; every other value,
    /// including ones that are neither `passed` nor `failed`, is final.
    pub fn is_pending(&self) -> bool {
        matches!(self, JobState::Created | JobState::Started)
    }
}

impl From<String> for JobState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "created" => JobState::Created,
            "started" => JobState::Started,
            "passed" => JobState::Passed,
            "failed" => JobState::Failed,
            _ => JobState::Other(s),
        }
    }
}

impl From<JobState> for String {
    fn from(state: JobState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The matrix axes of a job's `.travis.yml` expansion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub os: Option<String>,
    /// `node_js` is a string or a bare number depending on how the YAML was
    /// written, so it is kept untyped.
    #[serde(default)]
    pub node_js: Option<Value>,
}

impl JobConfig {
    pub fn os(&self) -> &str {
        self.os.as_deref().unwrap_or(DEFAULT_OS)
    }

    /// Runtime version label, e.g. `"6"` or `"4.2"`.
    pub fn runtime_version(&self) -> String {
        match &self.node_js {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "unknown".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Snapshot of one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub state: JobState,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: JobConfig,
}

impl Job {
    /// Convenience constructor used by fakes and tests.
    pub fn new(id: JobId, state: JobState, os: &str, node_js: &str) -> Self {
        Self {
            id,
            state,
            number: None,
            started_at: None,
            config: JobConfig {
                os: Some(os.to_string()),
                node_js: Some(Value::String(node_js.to_string())),
            },
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn os(&self) -> &str {
        self.config.os()
    }

    pub fn runtime_version(&self) -> String {
        self.config.runtime_version()
    }
}

/// Envelope of `GET /jobs/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobEnvelope {
    pub job: Job,
}
