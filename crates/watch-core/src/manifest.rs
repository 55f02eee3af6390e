//! Repository identity from the project manifest.
//!
//! Reads the `repository` field of `package.json` and extracts the GitHub
//! `(user, project)` pair Travis indexes builds by.

use std::path::Path;

use regex::Regex;
use serde_json::Value;
use travis_api::RepoSlug;

use crate::error::{Result, WatchError};

/// Manifest file name looked up in the project directory.
pub const MANIFEST_FILE: &str = "package.json";

/// `user/project` or `github:user/project`
const SHORTHAND_PATTERN: &str = r"^(?:github:)?([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$";

/// Any URL form pointing at github.com (https, git+https, git://, ssh, scp-like)
const GITHUB_URL_PATTERN: &str = r"github\.com[:/]+([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?(?:#.*)?$";

/// Resolve `(user, project)` for the project in `dir`.
pub fn resolve_repo_identity(dir: &Path) -> Result<RepoSlug> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| WatchError::Manifest(format!("cannot read {}: {e}", path.display())))?;
    let manifest: Value = serde_json::from_str(&content)
        .map_err(|e| WatchError::Manifest(format!("invalid JSON in {}: {e}", path.display())))?;

    let repository = repository_url(&manifest).ok_or_else(|| {
        WatchError::RepoIdentity(format!("{} has no repository field", path.display()))
    })?;

    parse_repository(repository)
}

/// The `repository` field as a string, whether given inline or as `{ url }`.
fn repository_url(manifest: &Value) -> Option<&str> {
    match manifest.get("repository")? {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str),
        _ => None,
    }
}

/// Parse a repository reference into its GitHub slug.
pub fn parse_repository(repository: &str) -> Result<RepoSlug> {
    let repository = repository.trim();

    for pattern in [SHORTHAND_PATTERN, GITHUB_URL_PATTERN] {
        let re = Regex::new(pattern)
            .map_err(|e| WatchError::RepoIdentity(format!("bad pattern {pattern}: {e}")))?;
        if let Some(caps) = re.captures(repository) {
            let user = &caps[1];
            let project = caps[2].trim_end_matches(".git");
            if !user.is_empty() && !project.is_empty() {
                return Ok(RepoSlug::new(user, project));
            }
        }
    }

    Err(WatchError::RepoIdentity(format!(
        "not a GitHub repository: {repository}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_repository_forms() {
        let expected = RepoSlug::new("juliangruber", "travis-watch");
        for form in [
            "juliangruber/travis-watch",
            "github:juliangruber/travis-watch",
            "https://github.com/juliangruber/travis-watch",
            "https://github.com/juliangruber/travis-watch.git",
            "git+https://github.com/juliangruber/travis-watch.git",
            "git://github.com/juliangruber/travis-watch.git",
            "git@github.com:juliangruber/travis-watch.git",
            "git+ssh://git@github.com/juliangruber/travis-watch.git",
        ] {
            assert_eq!(parse_repository(form).unwrap(), expected, "form: {form}");
        }
    }

    #[test]
    fn test_parse_repository_keeps_dots_in_project() {
        let slug = parse_repository("https://github.com/foo/bar.js.git").unwrap();
        assert_eq!(slug, RepoSlug::new("foo", "bar.js"));
    }

    #[test]
    fn test_parse_repository_rejects_other_hosts() {
        let err = parse_repository("https://gitlab.com/foo/bar.git").unwrap_err();
        assert!(matches!(err, WatchError::RepoIdentity(_)));
        assert!(parse_repository("bitbucket:foo/bar").is_err());
    }

    #[test]
    fn test_resolve_from_object_repository() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"name": "x", "repository": {"type": "git", "url": "git+https://github.com/a/b.git"}}"#,
        )
        .unwrap();

        assert_eq!(resolve_repo_identity(dir.path()).unwrap(), RepoSlug::new("a", "b"));
    }

    #[test]
    fn test_resolve_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = resolve_repo_identity(dir.path()).unwrap_err();
        assert!(matches!(err, WatchError::Manifest(_)));
    }

    #[test]
    fn test_resolve_missing_repository_field() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"name": "x"}"#).unwrap();
        let err = resolve_repo_identity(dir.path()).unwrap_err();
        assert!(matches!(err, WatchError::RepoIdentity(_)));
    }
}
