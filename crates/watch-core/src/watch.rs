//! Coordinator and exit controller.
//!
//! One task owns all mutable state ([`WatchState`]): the result table, the
//! count of jobs still pending, the failure flag and, through the renderer,
//! the spinner frame. It multiplexes three activities with `tokio::select!`:
//!
//! - the render interval,
//! - job snapshots forwarded by the per-job poll tasks,
//! - completion of those tasks (to surface provider errors).
//!
//! When the last job turns terminal a final frame is drawn synchronously and
//! the outcome is returned; [`WatchOutcome::exit_code`] maps it to the
//! process exit status.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::info;
use travis_api::{Build, CiProvider, Job, JobState};

use crate::config::{DEFAULT_OS_ORDER, RENDER_INTERVAL};
use crate::error::{Result, WatchError};
use crate::locator::locate_build;
use crate::poller::poll_job;
use crate::query::BuildQuery;
use crate::render::{Phase, StatusRenderer};
use crate::table::ResultTable;

/// State shared between the poll loops and the renderer, owned by the
/// coordinating task.
#[derive(Debug, Clone)]
pub struct WatchState {
    table: ResultTable,
    phase: Phase,
    pending: usize,
    any_failed: bool,
}

impl WatchState {
    pub fn new<S: AsRef<str>>(os_order: &[S]) -> Self {
        Self {
            table: ResultTable::new(os_order),
            phase: Phase::LocatingBuild,
            pending: 0,
            any_failed: false,
        }
    }

    /// Switch to job tracking for a build with `job_count` jobs.
    pub fn begin_jobs(&mut self, job_count: usize) {
        self.phase = Phase::LoadingJobs;
        self.pending = job_count;
    }

    /// Record a fetched snapshot. Returns `true` once every job is terminal.
    pub fn apply(&mut self, job: Job) -> bool {
        if job.state == JobState::Failed {
            self.any_failed = true;
        }
        let terminal = !job.state.is_pending();
        if terminal {
            info!(job_id = job.id, state = %job.state, os = job.os(), "job finished");
        }
        self.table.record(job);

        if terminal {
            self.pending = self.pending.saturating_sub(1);
        }
        terminal && self.pending == 0
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn any_failed(&self) -> bool {
        self.any_failed
    }
}

/// Result of a completed watch.
#[derive(Debug, Clone)]
pub struct WatchOutcome {
    pub build: Build,
    pub table: ResultTable,
    pub any_failed: bool,
}

impl WatchOutcome {
    /// `1` if any job reported `failed`, else `0`.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.any_failed)
    }
}

/// Locates the build for a commit and tracks its jobs to completion while
/// redrawing the status view.
pub struct Watcher<W: Write> {
    provider: Arc<dyn CiProvider>,
    renderer: StatusRenderer<W>,
    render_interval: Duration,
    os_order: Vec<String>,
}

impl<W: Write> Watcher<W> {
    pub fn new(provider: Arc<dyn CiProvider>, renderer: StatusRenderer<W>) -> Self {
        Self {
            provider,
            renderer,
            render_interval: RENDER_INTERVAL,
            os_order: DEFAULT_OS_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_render_interval(mut self, interval: Duration) -> Self {
        self.render_interval = interval;
        self
    }

    pub fn with_os_order(mut self, os_order: Vec<String>) -> Self {
        self.os_order = os_order;
        self
    }

    pub fn renderer(&self) -> &StatusRenderer<W> {
        &self.renderer
    }

    /// Watch the build for `query` until every job is terminal.
    ///
    /// Provider errors abort the watch immediately; remaining poll tasks are
    /// cancelled when the task set is dropped.
    pub async fn run(&mut self, query: &BuildQuery) -> Result<WatchOutcome> {
        let mut state = WatchState::new(self.os_order.as_slice());
        let mut ticker = tokio::time::interval(self.render_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let provider = Arc::clone(&self.provider);
        let build = {
            let locate = locate_build(provider.as_ref(), query);
            tokio::pin!(locate);
            loop {
                tokio::select! {
                    located = &mut locate => break located?,
                    _ = ticker.tick() => self.renderer.render(&state.table, state.phase)?,
                }
            }
        };

        state.begin_jobs(build.job_ids.len());
        if build.job_ids.is_empty() {
            info!(build_id = build.id, "build has no jobs");
            self.renderer.render(&state.table, state.phase)?;
            return Ok(state.into_outcome(build));
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let mut polls = JoinSet::new();
        for &job_id in &build.job_ids {
            let provider = Arc::clone(&self.provider);
            let tx = tx.clone();
            polls.spawn(async move { poll_job(provider.as_ref(), job_id, &tx).await });
        }
        drop(tx);

        loop {
            tokio::select! {
                biased;

                Some(job) = rx.recv() => {
                    if state.apply(job) {
                        self.renderer.render(&state.table, state.phase)?;
                        break;
                    }
                }
                Some(joined) = polls.join_next() => match joined {
                    Ok(Ok(_)) => {}
                    Ok(Err(err)) => return Err(err),
                    Err(err) => return Err(WatchError::Task(err.to_string())),
                },
                _ = ticker.tick() => self.renderer.render(&state.table, state.phase)?,
            }
        }

        Ok(state.into_outcome(build))
    }
}

impl WatchState {
    fn into_outcome(self, build: Build) -> WatchOutcome {
        WatchOutcome {
            build,
            table: self.table,
            any_failed: self.any_failed,
        }
    }
}
