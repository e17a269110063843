// gitpin-common/src/lib.rs
pub mod config;
pub mod error;
pub mod lock;
pub mod manifest;
pub mod model;

// Re-export key types
pub use config::Config;
pub use error::{GitpinError, Result};
pub use manifest::Manifest;
pub use model::{CommitId, Dependency, LockDependency, RepoName, RepoUrl, RevSpec};
