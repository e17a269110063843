// gitpin-common/src/lock.rs
//! The `.gitpin.lock` file: the frozen output of a prior resolution.
//!
//! One resolved dependency per line, three whitespace-separated tokens:
//! dependency URL (with revision-specifier fragment), revision specifier,
//! exact commit id. Comments and blank lines are ignored on read. Writing an
//! empty set deletes the file, so presence of the file is itself meaningful.
use std::fs;
use std::path::Path;

use url::Url;

use crate::error::{GitpinError, Result};
use crate::model::{CommitId, Dependency, LockDependency, RepoUrl, RevSpec};

fn parse_line(tokens: &[&str], path: &Path, line: usize, raw: &str) -> Result<LockDependency> {
    let parse_err = |reason: &str| GitpinError::Parse {
        path: path.to_path_buf(),
        line,
        text: raw.to_string(),
        reason: reason.to_string(),
    };

    if tokens.len() != 3 {
        return Err(parse_err("Expected URL, revision specifier, and commit ID"));
    }

    let mut url =
        Url::parse(tokens[0]).map_err(|_| parse_err("Expected valid repository URL"))?;
    url.set_fragment(None);
    let url = RepoUrl::from_url(url).map_err(|_| parse_err("Expected valid repository URL"))?;

    let rev =
        RevSpec::new(tokens[1]).map_err(|_| parse_err("Expected valid revision specifier"))?;
    let commit_id =
        CommitId::new(tokens[2]).map_err(|_| parse_err("Expected valid commit identifier"))?;

    Ok(LockDependency::new(Dependency::new(url, rev), commit_id))
}

pub fn parse_str(content: &str, path: &Path) -> Result<Vec<LockDependency>> {
    let mut result = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        result.push(parse_line(&tokens, path, index + 1, raw_line)?);
    }

    Ok(result)
}

/// Read a lock file. Absence means "never resolved" and is an error at the
/// call sites that require one; callers check for the file first.
pub fn read(path: &Path) -> Result<Vec<LockDependency>> {
    if !path.is_file() {
        return Err(GitpinError::LockNotPresent);
    }
    let content = fs::read_to_string(path)?;
    parse_str(&content, path)
}

/// Write a lock file in traversal-emission order. A zero-length set deletes
/// any existing file rather than writing an empty one.
pub fn write(path: &Path, dependencies: &[LockDependency]) -> Result<()> {
    if dependencies.is_empty() {
        if path.exists() {
            fs::remove_file(path)?;
        }
        return Ok(());
    }

    let mut content = String::new();
    for d in dependencies {
        content.push_str(&d.dependency().to_url_string());
        content.push(' ');
        content.push_str(d.rev().as_str());
        content.push(' ');
        content.push_str(d.commit_id().as_str());
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
