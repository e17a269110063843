// gitpin-core/src/lib.rs
pub mod reporter;
pub mod resolver;
pub mod vcs;
pub mod workspace;

pub use reporter::{Reporter, RestoreDisposition, TraceReporter};
pub use resolver::{Resolver, RestoreMode};
pub use vcs::{GitVcs, Vcs};
pub use workspace::{Repository, Workspace};
