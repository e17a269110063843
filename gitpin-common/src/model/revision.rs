// gitpin-common/src/model/revision.rs
use std::fmt;

use crate::error::{GitpinError, Result};

fn validate_rev(raw: &str) -> std::result::Result<(), String> {
    if raw.is_empty() {
        return Err("empty".into());
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-'))
    {
        return Err("contains characters outside [A-Za-z0-9/_.-]".into());
    }
    if raw.starts_with('/') || raw.ends_with('/') {
        return Err("starts or ends with '/'".into());
    }
    Ok(())
}

/// A human-meaningful reference to a revision: a branch name, tag, or hash.
/// What it points to may change over time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevSpec {
    raw: String,
}

impl RevSpec {
    pub fn new(raw: &str) -> Result<Self> {
        validate_rev(raw)
            .map_err(|reason| GitpinError::InvalidRevision(raw.to_string(), reason))?;
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// The specifier for "whatever is currently checked out", used as the
    /// root repository's pseudo-specifier during traversal.
    pub fn head() -> Self {
        Self { raw: "HEAD".into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RevSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An exact, immutable revision identifier (a content hash). Syntactically a
/// valid `RevSpec`; distinguished by role: a `RevSpec` may resolve to
/// different `CommitId`s over time, a `CommitId` never does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId {
    raw: String,
}

impl CommitId {
    pub fn new(raw: &str) -> Result<Self> {
        validate_rev(raw)
            .map_err(|reason| GitpinError::InvalidRevision(raw.to_string(), reason))?;
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn as_rev_spec(&self) -> RevSpec {
        RevSpec {
            raw: self.raw.clone(),
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_branches_tags_and_hashes() {
        assert!(RevSpec::new("master").is_ok());
        assert!(RevSpec::new("feature/topic-1").is_ok());
        assert!(RevSpec::new("v1.2.3").is_ok());
        assert!(CommitId::new("0d11b76bd7ff16a24c6390fb5f75017ba59eee42").is_ok());
    }

    #[test]
    fn rejects_whitespace_and_stray_slashes() {
        assert!(RevSpec::new("").is_err());
        assert!(RevSpec::new("a b").is_err());
        assert!(RevSpec::new("/branch").is_err());
        assert!(RevSpec::new("branch/").is_err());
        assert!(RevSpec::new("bra~nch").is_err());
    }
}
