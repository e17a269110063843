// gitpin-common/src/model/url.rs
use std::fmt;

use url::Url;

use super::name::RepoName;
use crate::error::{GitpinError, Result};

/// Absolute URL identifying a fetchable repository. Carries no revision
/// information; fragments and query components are rejected. The repository's
/// short name is derived from the final path segment, with a trailing `.git`
/// stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoUrl {
    url: Url,
}

impl RepoUrl {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)
            .map_err(|e| GitpinError::InvalidUrl(raw.to_string(), e.to_string()))?;
        Self::from_url(url)
    }

    pub fn from_url(url: Url) -> Result<Self> {
        if url.fragment().is_some() {
            return Err(GitpinError::InvalidUrl(
                url.to_string(),
                "fragments are not permitted in repository URLs".into(),
            ));
        }
        if url.query().is_some() {
            return Err(GitpinError::InvalidUrl(
                url.to_string(),
                "query components are not permitted in repository URLs".into(),
            ));
        }
        let repo_url = Self { url };
        // Fails when no usable name can be derived
        repo_url.name()?;
        Ok(repo_url)
    }

    /// Short name of the repository the URL points at.
    pub fn name(&self) -> Result<RepoName> {
        let segment = self
            .url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .ok_or_else(|| {
                GitpinError::InvalidUrl(
                    self.url.to_string(),
                    "no repository name in URL path".into(),
                )
            })?;
        let stem = segment.strip_suffix(".git").unwrap_or(segment);
        RepoName::new(stem)
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
