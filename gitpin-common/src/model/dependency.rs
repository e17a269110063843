// gitpin-common/src/model/dependency.rs
use url::Url;

use super::name::RepoName;
use super::revision::{CommitId, RevSpec};
use super::url::RepoUrl;
use crate::error::{GitpinError, Result};

/// A required repository plus the revision specifier to check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    url: RepoUrl,
    rev: RevSpec,
}

impl Dependency {
    pub fn new(url: RepoUrl, rev: RevSpec) -> Self {
        Self { url, rev }
    }

    /// Parse a dependency URL: a repository URL with an optional revision
    /// specifier as the URL fragment.
    ///
    /// No fragment implies the configured default branch:
    /// `http://example.com/path/to/repo.git`
    ///
    /// Branch, tag, or SHA-1 as fragment:
    /// `http://example.com/path/to/repo.git#branch-name`
    pub fn parse_url(raw: &str, default_branch: &str) -> Result<Self> {
        let mut url = Url::parse(raw)
            .map_err(|e| GitpinError::InvalidUrl(raw.to_string(), e.to_string()))?;

        let rev = match url.fragment() {
            Some(fragment) if !fragment.is_empty() => RevSpec::new(fragment).map_err(|_| {
                GitpinError::InvalidUrl(
                    raw.to_string(),
                    "URL fragment is not a valid revision specifier".into(),
                )
            })?,
            _ => RevSpec::new(default_branch)?,
        };

        url.set_fragment(None);
        let url = RepoUrl::from_url(url)?;

        Ok(Self { url, rev })
    }

    pub fn url(&self) -> &RepoUrl {
        &self.url
    }

    pub fn rev(&self) -> &RevSpec {
        &self.rev
    }

    pub fn name(&self) -> Result<RepoName> {
        self.url.name()
    }

    /// Render back to URL-with-fragment form, as written in lock files.
    pub fn to_url_string(&self) -> String {
        format!("{}#{}", self.url, self.rev)
    }
}

/// A `Dependency` pinned to the exact revision that a prior resolution
/// produced. The durable unit of the lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockDependency {
    dependency: Dependency,
    commit_id: CommitId,
}

impl LockDependency {
    pub fn new(dependency: Dependency, commit_id: CommitId) -> Self {
        Self {
            dependency,
            commit_id,
        }
    }

    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    pub fn url(&self) -> &RepoUrl {
        self.dependency.url()
    }

    pub fn rev(&self) -> &RevSpec {
        self.dependency.rev()
    }

    pub fn commit_id(&self) -> &CommitId {
        &self.commit_id
    }

    pub fn name(&self) -> Result<RepoName> {
        self.dependency.name()
    }
}
