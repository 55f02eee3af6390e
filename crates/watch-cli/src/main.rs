//! travis-watch - follow the Travis CI build of the current checkout
//!
//! Resolves the GitHub repository from `package.json`, the commit from
//! `git rev-parse HEAD`, then draws a live matrix of the build's jobs until
//! every job has finished. Exits 1 if any job failed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use travis_api::TravisClient;
use watch_core::{
    capture_head_sha, init_tracing, resolve_repo_identity, BuildQuery, StatusRenderer,
    WatchConfig, Watcher,
};

#[derive(Parser)]
#[command(name = "travis-watch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Watch the Travis CI build of the current commit", long_about = None)]
struct Cli {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    dir: PathBuf,
}

fn build_query(dir: &Path) -> Result<BuildQuery> {
    let repo = resolve_repo_identity(dir)
        .with_context(|| format!("Failed to resolve repository for {:?}", dir))?;
    let sha = capture_head_sha(dir).context("Failed to read current commit")?;
    Ok(BuildQuery::new(repo, sha))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = WatchConfig::from_env();
    init_tracing(config.log_json, config.log_level);

    let dir = cli
        .dir
        .canonicalize()
        .with_context(|| format!("Project directory {:?} not found", cli.dir))?;
    let query = build_query(&dir)?;
    info!(repo = %query.repo, sha = query.short_sha(), "watching");

    let client =
        TravisClient::new(config.travis.clone()).context("Failed to create Travis client")?;
    let renderer = StatusRenderer::new(std::io::stdout());
    let mut watcher = Watcher::new(Arc::new(client), renderer)
        .with_render_interval(config.render_interval)
        .with_os_order(config.os_order.clone());

    let outcome = watcher.run(&query).await?;
    Ok(ExitCode::from(outcome.exit_code()))
}
