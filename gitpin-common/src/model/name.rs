// gitpin-common/src/model/name.rs
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{GitpinError, Result};

/// Short name of a repository, derived from the final path segment of its
/// URL. Identity is case-insensitive: `LibFoo` and `libfoo` refer to the
/// same working copy directory on case-insensitive filesystems, so they are
/// the same repository.
#[derive(Debug, Clone)]
pub struct RepoName {
    raw: String,
}

impl RepoName {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(GitpinError::InvalidRepoName(raw.to_string(), "empty".into()));
        }
        if raw.chars().any(|c| c.is_whitespace()) {
            return Err(GitpinError::InvalidRepoName(
                raw.to_string(),
                "contains whitespace".into(),
            ));
        }
        if raw.contains('/') || raw.contains('\\') {
            return Err(GitpinError::InvalidRepoName(
                raw.to_string(),
                "contains a path separator".into(),
            ));
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn folded(&self) -> String {
        self.raw.to_lowercase()
    }
}

impl PartialEq for RepoName {
    fn eq(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }
}

impl Eq for RepoName {}

impl Hash for RepoName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded().hash(state);
    }
}

impl PartialOrd for RepoName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RepoName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(&other.folded())
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
