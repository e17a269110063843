// gitpin-common/src/error.rs
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GitpinError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("{path}:{line}: {reason} in '{text}'")]
    Parse {
        path: PathBuf,
        /// 1-based line number of the offending line.
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Invalid repository URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("Invalid revision specifier '{0}': {1}")]
    InvalidRevision(String, String),

    #[error("Invalid repository name '{0}': {1}")]
    InvalidRepoName(String, String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Uncommitted changes in {0}")]
    UncommittedChanges(String),

    #[error("No repository named '{0}' in workspace")]
    RepositoryNotFound(String),

    #[error("Not in a repository")]
    NotInRepository,

    #[error("No lock file present, run 'gitpin update' to create it")]
    LockNotPresent,

    #[error("Git Error: {0}")]
    Vcs(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for GitpinError {
    fn from(err: std::io::Error) -> Self {
        GitpinError::Io(Arc::new(err))
    }
}

impl GitpinError {
    /// Whether the error is an expected, user-facing failure (bad input,
    /// dirty working copy, missing files) as opposed to an internal one.
    /// The CLI prints user errors tersely and everything else with full
    /// diagnostic detail.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, GitpinError::Io(_) | GitpinError::Generic(_))
    }
}

pub type Result<T> = std::result::Result<T, GitpinError>;
