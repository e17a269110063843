// gitpin-core/src/reporter.rs
//! Progress reporting for the resolution engine.
//!
//! The engine never logs through global state directly; it notifies an
//! injected `Reporter`, so the CLI can render progress and tests can capture
//! it deterministically.
use gitpin_common::model::{LockDependency, RepoName, RepoUrl, RevSpec};
use tracing::{info, warn};

/// What restoring one lock record amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreDisposition {
    /// Working copy already at the exact locked revision.
    AlreadyCheckedOut { dirty: bool },
    /// Loose mode: working copy at a descendant of the locked revision.
    AlreadyAtDescendant { dirty: bool },
    /// Checked out by revision specifier (it still resolves to the locked
    /// id, so a human-readable ref is preserved).
    CheckedOutBySpec,
    /// Checked out by exact commit id.
    CheckedOutById,
}

pub trait Reporter {
    fn cloning(&self, url: &RepoUrl);

    fn checking_out(&self, name: &RepoName, rev: &RevSpec);

    /// A repository was re-encountered with a different specifier than the
    /// one already in effect. Non-fatal; first-discovered wins.
    fn conflict(&self, required_by: &RepoName, name: &RepoName, requested: &RevSpec, retained: &RevSpec);

    fn restoring(&self, dependency: &LockDependency, disposition: RestoreDisposition);
}

/// Default reporter: forwards everything to `tracing`.
#[derive(Debug, Default)]
pub struct TraceReporter;

impl Reporter for TraceReporter {
    fn cloning(&self, url: &RepoUrl) {
        info!("Cloning {}", url);
    }

    fn checking_out(&self, name: &RepoName, rev: &RevSpec) {
        info!("Checking out {} to {}", name, rev);
    }

    fn conflict(&self, required_by: &RepoName, name: &RepoName, requested: &RevSpec, retained: &RevSpec) {
        warn!(
            "{} depends on {}#{} but #{} has already been checked out",
            required_by, name, requested, retained
        );
    }

    fn restoring(&self, dependency: &LockDependency, disposition: RestoreDisposition) {
        let name = dependency
            .name()
            .map(|n| n.to_string())
            .unwrap_or_else(|_| dependency.url().to_string());
        match disposition {
            RestoreDisposition::AlreadyCheckedOut { dirty: false } => {
                info!("{}: already checked out", name);
            }
            RestoreDisposition::AlreadyCheckedOut { dirty: true } => {
                info!("{}: already checked out, with uncommitted changes", name);
            }
            RestoreDisposition::AlreadyAtDescendant { dirty: false } => {
                info!("{}: already checked out to a descendant", name);
            }
            RestoreDisposition::AlreadyAtDescendant { dirty: true } => {
                info!(
                    "{}: already checked out to a descendant, with uncommitted changes",
                    name
                );
            }
            RestoreDisposition::CheckedOutBySpec => {
                info!("{}: checking out {}", name, dependency.rev());
            }
            RestoreDisposition::CheckedOutById => {
                info!("{}: checking out {}", name, dependency.commit_id());
            }
        }
    }
}
