//! Watch-Core: live Travis CI build matrix for a checkout
//!
//! Locates the Travis build for the current commit, polls every job of that
//! build until it finishes, and redraws an in-place status view grouped by
//! operating system and runtime version.
//!
//! The pieces, leaf-first:
//! - [`manifest`] and [`git`]: which repository and commit to watch
//! - [`locator`]: find the build for that commit
//! - [`poller`]: one poll loop per job
//! - [`render`] and [`terminal`]: the status view
//! - [`watch`]: coordinator and exit controller

pub mod config;
pub mod error;
pub mod git;
pub mod locator;
pub mod manifest;
pub mod poller;
pub mod query;
pub mod render;
pub mod table;
pub mod telemetry;
pub mod terminal;
pub mod version;
pub mod watch;

pub use config::WatchConfig;
pub use error::{Result, WatchError};
pub use git::capture_head_sha;
pub use locator::locate_build;
pub use manifest::resolve_repo_identity;
pub use poller::poll_job;
pub use query::BuildQuery;
pub use render::{Phase, StatusRenderer};
pub use table::ResultTable;
pub use telemetry::init_tracing;
pub use version::{compare_versions, normalize_version};
pub use watch::{WatchOutcome, WatchState, Watcher};

pub use travis_api::{CiProvider, Job, JobState, RepoSlug, TravisClient, TravisConfig};
