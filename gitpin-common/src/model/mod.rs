// gitpin-common/src/model/mod.rs
pub mod dependency;
pub mod name;
pub mod revision;
pub mod url;

pub use dependency::{Dependency, LockDependency};
pub use name::RepoName;
pub use revision::{CommitId, RevSpec};
pub use url::RepoUrl;
