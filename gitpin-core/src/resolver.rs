// gitpin-core/src/resolver.rs
//! Dependency resolution engine.
//!
//! Traverses the graph of required repositories breadth-first, cloning and
//! checking out working copies as they are encountered. For a given
//! repository, the revision specified by the first-encountered (shallowest)
//! dependency is used; later dependencies on the same revision do nothing and
//! later dependencies on a different revision produce a warning.
//!
//! Traversal, cloning and checkout are strictly sequential: checkout order
//! determines which specifier wins a conflict, so interleaving would make
//! outcomes nondeterministic.
use std::collections::{HashMap, HashSet, VecDeque};

use gitpin_common::error::{GitpinError, Result};
use gitpin_common::model::{Dependency, LockDependency, RepoName, RevSpec};
use tracing::debug;

use crate::reporter::{Reporter, RestoreDisposition};
use crate::vcs::Vcs;
use crate::workspace::{Repository, Workspace};

/// Leniency of restore against working copies that have moved since the lock
/// was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreMode {
    /// Any deviation from the locked revision, and any uncommitted change,
    /// is an error. For reproducible/CI restores.
    Strict,
    /// A working copy already at the locked revision or a descendant of it
    /// is accepted as-is, so a developer working past the lock is not forced
    /// backward to restore siblings.
    Loose,
}

/// Transient per-invocation traversal state. Discarded when the invocation
/// completes; only the emitted lock records are durable.
#[derive(Debug)]
struct TraversalState {
    /// Revision specifier first assigned to each repository.
    checked_out: HashMap<RepoName, RevSpec>,
    /// Repositories whose own dependencies have been (or are queued to be)
    /// expanded.
    visited: HashSet<RepoName>,
}

impl TraversalState {
    fn for_root(root: &RepoName) -> Self {
        let mut checked_out = HashMap::new();
        checked_out.insert(root.clone(), RevSpec::head());
        let mut visited = HashSet::new();
        visited.insert(root.clone());
        Self {
            checked_out,
            visited,
        }
    }
}

pub struct Resolver<'a, V: Vcs, R: Reporter> {
    workspace: &'a Workspace,
    vcs: &'a V,
    reporter: &'a R,
}

impl<'a, V: Vcs, R: Reporter> Resolver<'a, V, R> {
    pub fn new(workspace: &'a Workspace, vcs: &'a V, reporter: &'a R) -> Self {
        Self {
            workspace,
            vcs,
            reporter,
        }
    }

    /// Update mode: fresh breadth-first resolution of `root`'s declared
    /// dependencies, leaving every involved working copy checked out to the
    /// resolved revision and rewriting `root`'s lock file.
    ///
    /// Returns the pinned dependencies in traversal order (each repository
    /// appears exactly once, shallowest requirement first).
    pub fn update(&self, root: &Repository) -> Result<Vec<LockDependency>> {
        debug!("Calculating dependencies of {}", root.name());

        let mut state = TraversalState::for_root(root.name());
        let mut pinned: Vec<LockDependency> = Vec::new();

        let mut queue: VecDeque<(Vec<Dependency>, RepoName)> = VecDeque::new();
        queue.push_back((root.read_manifest()?.dependencies, root.name().clone()));

        while let Some((dependencies, required_by)) = queue.pop_front() {
            // Clone everything this batch needs before any checkout, so
            // identity and ancestry checks never hit a missing working copy.
            for dependency in &dependencies {
                let name = dependency.name()?;
                if state.visited.contains(&name) {
                    continue;
                }
                if self.workspace.find_repository(self.vcs, &name).is_none() {
                    self.reporter.cloning(dependency.url());
                    self.vcs
                        .clone_repository(self.workspace.root(), dependency.url())?;
                }
            }

            // Visit in declaration order; first encounter wins.
            let mut newly_visited: Vec<RepoName> = Vec::new();
            for dependency in &dependencies {
                let name = dependency.name()?;
                match state.checked_out.get(&name) {
                    None => {
                        let repo = self.workspace.get_repository(self.vcs, &name)?;
                        self.reporter.checking_out(&name, dependency.rev());
                        self.vcs.checkout(repo.path(), dependency.rev().as_str())?;
                        state
                            .checked_out
                            .insert(name.clone(), dependency.rev().clone());
                        state.visited.insert(name.clone());
                        newly_visited.push(name.clone());

                        let commit_id = self.vcs.resolve_commit(repo.path(), "HEAD")?;
                        pinned.push(LockDependency::new(dependency.clone(), commit_id));
                    }
                    Some(retained) if retained == dependency.rev() => {
                        // Subsequent requirement on the same revision: no-op
                    }
                    Some(retained) => {
                        self.reporter
                            .conflict(&required_by, &name, dependency.rev(), retained);
                    }
                }
            }

            // Expand the repositories first seen in this batch. Manifests
            // are re-read from disk: the checkout above may have changed
            // which declaration file is present.
            for name in newly_visited {
                let repo = self.workspace.get_repository(self.vcs, &name)?;
                queue.push_back((repo.read_manifest()?.dependencies, name));
            }
        }

        root.write_lock(&pinned)?;
        Ok(pinned)
    }

    /// Restore mode: replay `root`'s lock records in their persisted order,
    /// reconciling each working copy against the recorded exact revision.
    /// Never rewrites the lock file.
    pub fn restore(&self, root: &Repository, mode: RestoreMode) -> Result<()> {
        let lock_dependencies = root.read_lock()?;
        for dependency in &lock_dependencies {
            self.restore_one(dependency, mode)?;
        }
        Ok(())
    }

    fn restore_one(&self, locked: &LockDependency, mode: RestoreMode) -> Result<()> {
        let name = locked.name()?;
        debug!(
            "Restoring {} to {} ({})",
            name,
            locked.rev(),
            locked.commit_id()
        );

        let repo = match self.workspace.find_repository(self.vcs, &name) {
            Some(repo) => repo,
            None => {
                self.reporter.cloning(locked.url());
                self.vcs
                    .clone_repository(self.workspace.root(), locked.url())?;
                self.workspace.get_repository(self.vcs, &name)?
            }
        };

        let loose = mode == RestoreMode::Loose;
        let head = self.vcs.resolve_commit(repo.path(), "HEAD")?;
        let is_exact = &head == locked.commit_id();
        let is_descendant =
            !is_exact && self.vcs.is_ancestor(repo.path(), locked.commit_id(), &head)?;
        let is_dirty = self.vcs.has_uncommitted_changes(repo.path())?;
        // A specifier that no longer resolves simply doesn't match the
        // locked id; checkout falls back to the exact id below.
        let spec_resolves_to_locked_id = self
            .vcs
            .resolve_commit(repo.path(), locked.rev().as_str())
            .ok()
            .is_some_and(|id| &id == locked.commit_id());

        if !loose && is_dirty {
            return Err(GitpinError::UncommittedChanges(name.to_string()));
        }
        if loose && is_exact {
            self.reporter.restoring(
                locked,
                RestoreDisposition::AlreadyCheckedOut { dirty: is_dirty },
            );
            return Ok(());
        }
        if loose && is_descendant {
            self.reporter.restoring(
                locked,
                RestoreDisposition::AlreadyAtDescendant { dirty: is_dirty },
            );
            return Ok(());
        }
        if is_dirty {
            return Err(GitpinError::UncommittedChanges(name.to_string()));
        }
        if is_exact {
            self.reporter
                .restoring(locked, RestoreDisposition::AlreadyCheckedOut { dirty: false });
            return Ok(());
        }
        if spec_resolves_to_locked_id {
            self.reporter
                .restoring(locked, RestoreDisposition::CheckedOutBySpec);
            self.vcs.checkout(repo.path(), locked.rev().as_str())?;
        } else {
            self.reporter
                .restoring(locked, RestoreDisposition::CheckedOutById);
            self.vcs.checkout(repo.path(), locked.commit_id().as_str())?;
        }
        Ok(())
    }
}
