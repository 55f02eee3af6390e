//! Travis-API: Travis CI v2 access for travis-watch
//!
//! This crate is the provider layer. It owns the wire types returned by the
//! Travis v2 REST API, the [`CiProvider`] trait the watcher is written
//! against, and the reqwest-backed [`TravisClient`].
//!
//! ## Layer 0 - Provider
//!
//! In-memory fakes for the provider trait live in [`fakes`].

pub mod client;
pub mod error;
pub mod fakes;
pub mod provider;
pub mod types;

pub use client::{TravisClient, TravisConfig};
pub use error::ApiError;
pub use provider::CiProvider;
pub use types::{Build, BuildsPage, Commit, Job, JobConfig, JobId, JobState, RepoSlug};

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ApiError>;
