// gitpin-core/src/vcs.rs
//! The version-control collaborator the resolution engine drives.
//!
//! The engine only ever talks to the `Vcs` trait; `GitVcs` is the git2-backed
//! implementation used by the CLI. Tests substitute a scripted
//! implementation.
use std::path::{Path, PathBuf};

use git2::build::CheckoutBuilder;
use git2::{BranchType, Oid, Repository as Git2Repository, StatusOptions};
use gitpin_common::error::{GitpinError, Result};
use gitpin_common::model::{CommitId, RepoUrl};
use tracing::debug;

pub trait Vcs {
    /// Clone `url` into a new working copy at `parent_dir/<name>`.
    fn clone_repository(&self, parent_dir: &Path, url: &RepoUrl) -> Result<()>;

    /// Check the working copy out to a revision specifier or exact id.
    /// Fails with `UncommittedChanges` when the working copy is dirty.
    fn checkout(&self, workdir: &Path, rev: &str) -> Result<()>;

    /// Resolve a specifier (or "HEAD") to the exact commit id it currently
    /// points at.
    fn resolve_commit(&self, workdir: &Path, rev: &str) -> Result<CommitId>;

    /// Whether `ancestor` is an ancestor of `descendant`.
    fn is_ancestor(&self, workdir: &Path, ancestor: &CommitId, descendant: &CommitId)
        -> Result<bool>;

    fn has_uncommitted_changes(&self, workdir: &Path) -> Result<bool>;

    /// Whether `path` is a valid working copy root.
    fn is_repository(&self, path: &Path) -> bool;
}

#[derive(Debug, Default)]
pub struct GitVcs;

impl GitVcs {
    pub fn new() -> Self {
        Self
    }

    /// Locate the working copy containing `start`, if any. The workspace the
    /// CLI operates on is that working copy's parent directory.
    pub fn find_containing_workdir(start: &Path) -> Option<PathBuf> {
        let repo = Git2Repository::discover(start).ok()?;
        repo.workdir().map(Path::to_path_buf)
    }

    fn open(workdir: &Path) -> Result<Git2Repository> {
        Git2Repository::open(workdir).map_err(|e| {
            GitpinError::Vcs(format!(
                "Failed to open repository at {}: {}",
                workdir.display(),
                e
            ))
        })
    }

    /// Resolve like `git rev-parse`, with a fallback to the `origin/`
    /// remote-tracking ref for branches that have not been checked out
    /// locally yet (fresh clones only materialise the default branch).
    fn revparse<'r>(repo: &'r Git2Repository, rev: &str) -> Result<git2::Object<'r>> {
        match repo.revparse_single(rev) {
            Ok(object) => Ok(object),
            Err(first_err) => repo
                .revparse_single(&format!("origin/{rev}"))
                .map_err(|_| GitpinError::Vcs(format!("Cannot resolve '{rev}': {first_err}"))),
        }
    }

    fn dirty_name(workdir: &Path) -> String {
        workdir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("repository")
            .to_string()
    }
}

impl Vcs for GitVcs {
    fn clone_repository(&self, parent_dir: &Path, url: &RepoUrl) -> Result<()> {
        let name = url.name()?;
        let destination = parent_dir.join(name.as_str());
        debug!("Cloning {} into {}", url, destination.display());
        git2::build::RepoBuilder::new()
            .clone(url.as_str(), &destination)
            .map_err(|e| GitpinError::Vcs(format!("Failed to clone {url}: {e}")))?;
        Ok(())
    }

    fn checkout(&self, workdir: &Path, rev: &str) -> Result<()> {
        if self.has_uncommitted_changes(workdir)? {
            return Err(GitpinError::UncommittedChanges(Self::dirty_name(workdir)));
        }

        let repo = Self::open(workdir)?;
        let object = Self::revparse(&repo, rev)?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| GitpinError::Vcs(format!("'{rev}' does not name a commit: {e}")))?;

        let mut options = CheckoutBuilder::new();
        options.safe();
        repo.checkout_tree(commit.as_object(), Some(&mut options))
            .map_err(|e| GitpinError::Vcs(format!("Failed to check out '{rev}': {e}")))?;

        // Leave HEAD on a branch when the specifier names one, the way
        // `git checkout` would; detach otherwise.
        if repo.find_branch(rev, BranchType::Local).is_ok() {
            repo.set_head(&format!("refs/heads/{rev}"))
                .map_err(|e| GitpinError::Vcs(format!("Failed to set HEAD to '{rev}': {e}")))?;
        } else if repo.find_branch(&format!("origin/{rev}"), BranchType::Remote).is_ok() {
            // Create a local branch for the remote-tracking one
            let mut branch = repo
                .branch(rev, &commit, false)
                .map_err(|e| GitpinError::Vcs(format!("Failed to create branch '{rev}': {e}")))?;
            branch.set_upstream(Some(&format!("origin/{rev}"))).ok();
            repo.set_head(&format!("refs/heads/{rev}"))
                .map_err(|e| GitpinError::Vcs(format!("Failed to set HEAD to '{rev}': {e}")))?;
        } else {
            repo.set_head_detached(commit.id())
                .map_err(|e| GitpinError::Vcs(format!("Failed to detach HEAD at '{rev}': {e}")))?;
        }

        debug!("Checked out '{}' in {}", rev, workdir.display());
        Ok(())
    }

    fn resolve_commit(&self, workdir: &Path, rev: &str) -> Result<CommitId> {
        let repo = Self::open(workdir)?;
        let object = Self::revparse(&repo, rev)?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| GitpinError::Vcs(format!("'{rev}' does not name a commit: {e}")))?;
        CommitId::new(&commit.id().to_string())
    }

    fn is_ancestor(
        &self,
        workdir: &Path,
        ancestor: &CommitId,
        descendant: &CommitId,
    ) -> Result<bool> {
        let repo = Self::open(workdir)?;
        let ancestor_oid = Oid::from_str(ancestor.as_str())
            .map_err(|e| GitpinError::Vcs(format!("Invalid commit id '{ancestor}': {e}")))?;
        let descendant_oid = Oid::from_str(descendant.as_str())
            .map_err(|e| GitpinError::Vcs(format!("Invalid commit id '{descendant}': {e}")))?;
        repo.graph_descendant_of(descendant_oid, ancestor_oid)
            .map_err(|e| GitpinError::Vcs(format!("Ancestry check failed: {e}")))
    }

    fn has_uncommitted_changes(&self, workdir: &Path) -> Result<bool> {
        let repo = Self::open(workdir)?;
        let mut options = StatusOptions::new();
        // Untracked files don't block a checkout, only modified tracked ones do
        options.include_untracked(false).include_ignored(false);
        let statuses = repo
            .statuses(Some(&mut options))
            .map_err(|e| GitpinError::Vcs(format!("Failed to read status: {e}")))?;
        Ok(!statuses.is_empty())
    }

    fn is_repository(&self, path: &Path) -> bool {
        Git2Repository::open(path).is_ok()
    }
}
