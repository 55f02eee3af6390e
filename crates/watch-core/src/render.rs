//! Status view: one section per operating system, one line per job.
//!
//! ```text
//!
//! linux
//!   ✓ node 4
//!   ⠹ node 6 (1m)
//!
//! ```
//!
//! The renderer is driven by a timer. Every call recomposes the full frame
//! from the [`ResultTable`], hands it to [`Redraw`], and advances the shared
//! spinner frame so all animating glyphs stay in step.

use std::io::{self, Write};

use chrono::{DateTime, TimeDelta, Utc};
use crossterm::style::Stylize;
use travis_api::{Job, JobState};

use crate::table::ResultTable;
use crate::terminal::Redraw;

/// Braille "dots" spinner.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// What the watcher is waiting for before the first job is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    LocatingBuild,
    LoadingJobs,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::LocatingBuild => "Loading build",
            Phase::LoadingJobs => "Loading jobs",
        }
    }
}

/// Glyph for a job state. `created` and unrecognised states share the idle
/// spinner frame.
pub fn glyph(state: &JobState, frame: &str) -> String {
    match state {
        JobState::Failed => "×".red().to_string(),
        JobState::Passed => "✓".green().to_string(),
        JobState::Started => frame.yellow().to_string(),
        JobState::Created | JobState::Other(_) => frame.dark_grey().to_string(),
    }
}

/// Compact elapsed time: `"850ms"`, `"12s"`, `"1m"`, `"3h"`, `"2d"`.
///
/// Values are rounded to the largest unit that fits.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    const SECOND: f64 = 1_000.0;
    const MINUTE: f64 = SECOND * 60.0;
    const HOUR: f64 = MINUTE * 60.0;
    const DAY: f64 = HOUR * 24.0;

    let ms = elapsed.num_milliseconds().max(0) as f64;
    if ms >= DAY {
        format!("{}d", (ms / DAY).round() as i64)
    } else if ms >= HOUR {
        format!("{}h", (ms / HOUR).round() as i64)
    } else if ms >= MINUTE {
        format!("{}m", (ms / MINUTE).round() as i64)
    } else if ms >= SECOND {
        format!("{}s", (ms / SECOND).round() as i64)
    } else {
        format!("{}ms", ms as i64)
    }
}

fn job_line(version: &str, job: &Job, frame: &str, now: DateTime<Utc>) -> String {
    let mut line = format!("  {} node {}", glyph(&job.state, frame), version);
    if job.state == JobState::Started {
        if let Some(started_at) = job.started_at {
            let elapsed = format!("({})", format_elapsed(now - started_at));
            line.push(' ');
            line.push_str(&elapsed.white().to_string());
        }
    }
    line
}

/// Timer-driven renderer of the status view.
#[derive(Debug)]
pub struct StatusRenderer<W: Write> {
    redraw: Redraw<W>,
    frame_idx: usize,
    loading_stopped: bool,
    last_frame: String,
}

impl<W: Write> StatusRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            redraw: Redraw::new(out),
            frame_idx: 0,
            loading_stopped: false,
            last_frame: String::new(),
        }
    }

    /// Spinner frame the next render will use.
    pub fn frame_index(&self) -> usize {
        self.frame_idx
    }

    /// The most recently drawn frame.
    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    pub fn get_ref(&self) -> &W {
        self.redraw.get_ref()
    }

    /// Compose a frame without drawing it or advancing the spinner.
    pub fn compose(&self, table: &ResultTable, phase: Phase, now: DateTime<Utc>) -> String {
        let frame = SPINNER_FRAMES[self.frame_idx];
        let sections = table.sections();

        if sections.is_empty() {
            if self.loading_stopped {
                return String::new();
            }
            return format!("{} {}\n", frame.cyan(), phase.label());
        }

        let mut out = String::new();
        for section in &sections {
            out.push('\n');
            out.push_str(&section.os.dark_grey().to_string());
            out.push('\n');
            for (version, job) in &section.jobs {
                out.push_str(&job_line(version, job, frame, now));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Draw one frame as of `now` and advance the spinner.
    pub fn render_at(
        &mut self,
        table: &ResultTable,
        phase: Phase,
        now: DateTime<Utc>,
    ) -> io::Result<()> {
        let frame = self.compose(table, phase, now);
        if !table.is_empty() {
            self.loading_stopped = true;
        }
        self.redraw.write_frame(&frame)?;
        self.frame_idx = (self.frame_idx + 1) % SPINNER_FRAMES.len();
        self.last_frame = frame;
        Ok(())
    }

    /// Draw one frame at the current wall-clock time.
    pub fn render(&mut self, table: &ResultTable, phase: Phase) -> io::Result<()> {
        self.render_at(table, phase, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultTable {
        ResultTable::new(&["osx", "linux"])
    }

    #[test]
    fn format_elapsed_units() {
        assert_eq!(format_elapsed(TimeDelta::milliseconds(850)), "850ms");
        assert_eq!(format_elapsed(TimeDelta::seconds(12)), "12s");
        assert_eq!(format_elapsed(TimeDelta::seconds(65)), "1m");
        assert_eq!(format_elapsed(TimeDelta::seconds(90)), "2m");
        assert_eq!(format_elapsed(TimeDelta::hours(3)), "3h");
        assert_eq!(format_elapsed(TimeDelta::days(2)), "2d");
    }

    #[test]
    fn format_elapsed_clamps_clock_skew() {
        assert_eq!(format_elapsed(TimeDelta::seconds(-5)), "0ms");
    }

    #[test]
    fn loading_line_until_first_section() {
        let mut renderer = StatusRenderer::new(Vec::new());
        let mut t = table();
        let now = Utc::now();

        renderer.render_at(&t, Phase::LocatingBuild, now).unwrap();
        assert!(renderer.last_frame().contains("Loading build"));

        renderer.render_at(&t, Phase::LoadingJobs, now).unwrap();
        assert!(renderer.last_frame().contains("Loading jobs"));

        t.record(Job::new(1, JobState::Created, "linux", "6"));
        renderer.render_at(&t, Phase::LoadingJobs, now).unwrap();
        assert!(!renderer.last_frame().contains("Loading"));
        assert!(renderer.last_frame().contains("node 6"));
    }

    #[test]
    fn glyphs_per_state() {
        let mut t = table();
        t.record(Job::new(1, JobState::Failed, "linux", "4"));
        t.record(Job::new(2, JobState::Passed, "linux", "6"));
        t.record(Job::new(3, JobState::Created, "linux", "8"));

        let renderer = StatusRenderer::new(Vec::new());
        let frame = renderer.compose(&t, Phase::LoadingJobs, Utc::now());
        let lines: Vec<&str> = frame.lines().filter(|l| l.contains("node")).collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains('×') && lines[0].contains("node 4"));
        assert!(lines[1].contains('✓') && lines[1].contains("node 6"));
        assert!(lines[2].contains(SPINNER_FRAMES[0]) && lines[2].contains("node 8"));
    }

    #[test]
    fn started_job_shows_elapsed_minutes() {
        let now = Utc::now();
        let mut t = table();
        t.record(
            Job::new(1, JobState::Started, "osx", "6")
                .with_started_at(now - TimeDelta::seconds(65)),
        );

        let renderer = StatusRenderer::new(Vec::new());
        let frame = renderer.compose(&t, Phase::LoadingJobs, now);
        let line = frame.lines().find(|l| l.contains("node 6")).unwrap();
        assert!(line.contains("(1m)"), "line was {line:?}");
    }

    #[test]
    fn elapsed_only_for_started_jobs() {
        let now = Utc::now();
        let mut t = table();
        t.record(
            Job::new(1, JobState::Passed, "osx", "6")
                .with_started_at(now - TimeDelta::seconds(65)),
        );

        let renderer = StatusRenderer::new(Vec::new());
        let frame = renderer.compose(&t, Phase::LoadingJobs, now);
        assert!(!frame.contains("(1m)"));
    }

    #[test]
    fn osx_section_precedes_linux() {
        let mut t = table();
        t.record(Job::new(1, JobState::Passed, "linux", "6"));
        t.record(Job::new(2, JobState::Passed, "osx", "6"));

        let renderer = StatusRenderer::new(Vec::new());
        let frame = renderer.compose(&t, Phase::LoadingJobs, Utc::now());
        let osx = frame.find("osx").unwrap();
        let linux = frame.find("linux").unwrap();
        assert!(osx < linux);
    }

    #[test]
    fn consecutive_renders_differ_only_by_spinner_frame() {
        let now = Utc::now();
        let mut t = table();
        t.record(Job::new(1, JobState::Started, "linux", "6").with_started_at(now));
        t.record(Job::new(2, JobState::Passed, "linux", "4"));

        let mut renderer = StatusRenderer::new(Vec::new());
        renderer.render_at(&t, Phase::LoadingJobs, now).unwrap();
        let first = renderer.last_frame().to_string();
        renderer.render_at(&t, Phase::LoadingJobs, now).unwrap();
        let second = renderer.last_frame().to_string();

        assert_ne!(first, second);
        assert_eq!(
            first.replace(SPINNER_FRAMES[0], "*"),
            second.replace(SPINNER_FRAMES[1], "*")
        );
    }

    #[test]
    fn spinner_wraps() {
        let mut renderer = StatusRenderer::new(Vec::new());
        let t = table();
        for _ in 0..SPINNER_FRAMES.len() {
            renderer.render_at(&t, Phase::LocatingBuild, Utc::now()).unwrap();
        }
        assert_eq!(renderer.frame_index(), 0);
    }
}
