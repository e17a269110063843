// gitpin-core/src/workspace.rs
//! A workspace is a root directory holding named repository working copies.
use std::fs;
use std::path::{Path, PathBuf};

use gitpin_common::config::Config;
use gitpin_common::error::{GitpinError, Result};
use gitpin_common::lock;
use gitpin_common::manifest::Manifest;
use gitpin_common::model::{LockDependency, RepoName};
use tracing::debug;

use crate::vcs::Vcs;

/// A flat namespace of repository working copies keyed by name.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(GitpinError::Config(format!(
                "Workspace root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look for a repository by name. `None` when no such working copy
    /// exists.
    pub fn find_repository(&self, vcs: &dyn Vcs, name: &RepoName) -> Option<Repository> {
        let path = self.root.join(name.as_str());
        if !vcs.is_repository(&path) {
            return None;
        }
        Some(Repository::new(name.clone(), path, self.config.clone()))
    }

    /// Get a repository by name, failing when it is absent. Used after
    /// cloning, where absence indicates a cloning or naming inconsistency.
    pub fn get_repository(&self, vcs: &dyn Vcs, name: &RepoName) -> Result<Repository> {
        self.find_repository(vcs, name)
            .ok_or_else(|| GitpinError::RepositoryNotFound(name.to_string()))
    }

    /// All valid working copies currently in the workspace. Re-read from
    /// disk on every call.
    pub fn repositories(&self, vcs: &dyn Vcs) -> Result<Vec<Repository>> {
        let mut result = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_dir() || !vcs.is_repository(&path) {
                continue;
            }
            let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Ok(name) = RepoName::new(dir_name) else {
                debug!("Skipping oddly named directory: {}", path.display());
                continue;
            };
            result.push(Repository::new(name, path, self.config.clone()));
        }
        Ok(result)
    }
}

/// A named working copy inside a workspace. Owns the repository's manifest
/// and lock files.
#[derive(Debug, Clone)]
pub struct Repository {
    name: RepoName,
    path: PathBuf,
    config: Config,
}

impl Repository {
    fn new(name: RepoName, path: PathBuf, config: Config) -> Self {
        Self { name, path, config }
    }

    pub fn name(&self) -> &RepoName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest and lock files: `<repo>/.gitpin/` when
    /// that directory exists, the repository root otherwise.
    fn config_dir(&self) -> PathBuf {
        let dir = self.path.join(self.config.manifest_file_name());
        if dir.is_dir() {
            dir
        } else {
            self.path.clone()
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.config_dir().join(self.config.manifest_file_name())
    }

    pub fn lock_path(&self) -> PathBuf {
        self.config_dir().join(self.config.lock_file_name())
    }

    /// Read the declaration file. Always re-read from disk: a checkout
    /// performed mid-traversal can change which manifest is present.
    pub fn read_manifest(&self) -> Result<Manifest> {
        Manifest::read(&self.manifest_path(), &self.config)
    }

    pub fn has_lock(&self) -> bool {
        self.lock_path().is_file()
    }

    pub fn read_lock(&self) -> Result<Vec<LockDependency>> {
        lock::read(&self.lock_path())
    }

    /// Persist a resolved dependency set, replacing any prior lock file.
    /// An empty set deletes the file.
    pub fn write_lock(&self, dependencies: &[LockDependency]) -> Result<()> {
        lock::write(&self.lock_path(), dependencies)
    }
}
