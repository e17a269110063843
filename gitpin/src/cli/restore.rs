//! Contains the logic for the `restore` command.
use colored::Colorize;
use gitpin_common::config::Config;
use gitpin_common::error::{GitpinError, Result};
use gitpin_core::reporter::TraceReporter;
use gitpin_core::resolver::{Resolver, RestoreMode};
use gitpin_core::vcs::GitVcs;

use crate::cli::current_repository;

#[derive(clap::Args, Debug)]
pub struct RestoreArgs {
    /// Require working copies to match the locked revisions exactly, with
    /// no uncommitted changes (for reproducible/CI restores)
    #[arg(long)]
    exact: bool,
}

impl RestoreArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let vcs = GitVcs::new();
        let (workspace, root) = current_repository(&vcs, config)?;

        if !root.has_lock() {
            return Err(GitpinError::LockNotPresent);
        }

        let mode = if self.exact {
            RestoreMode::Strict
        } else {
            RestoreMode::Loose
        };
        tracing::debug!("Restoring {} ({:?})", root.name(), mode);

        let reporter = TraceReporter;
        let resolver = Resolver::new(&workspace, &vcs, &reporter);
        resolver.restore(&root, mode)?;

        println!(
            "{}{}",
            "==> ".bold().blue(),
            format!("Restored dependencies of {}", root.name()).bold()
        );
        Ok(())
    }
}
