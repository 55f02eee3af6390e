//! Error taxonomy for the watcher.
//!
//! A commit or build that the provider has not registered yet is not an
//! error; it keeps the locator retrying. Everything here is fatal.

use travis_api::ApiError;

/// Watcher errors.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("manifest error: {0}")]
    Manifest(String),

    #[error("cannot determine repository: {0}")]
    RepoIdentity(String),

    #[error("git error: {0}")]
    GitError(String),

    #[error("provider error: {0}")]
    Provider(#[from] ApiError),

    #[error("poll task failed: {0}")]
    Task(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for watcher operations.
pub type Result<T> = std::result::Result<T, WatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_error_display() {
        let err = WatchError::Manifest("no package.json".to_string());
        assert!(err.to_string().contains("manifest error"));

        let err = WatchError::GitError("not a repository".to_string());
        assert!(err.to_string().contains("git error"));
    }

    #[test]
    fn test_provider_error_wraps_api_error() {
        let err: WatchError = ApiError::Status {
            status: 500,
            url: "https://api.travis-ci.org/jobs/3".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("provider error"));
        assert!(msg.contains("500"));
    }
}
