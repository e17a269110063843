//! Contains the logic for the `update` command.
use colored::Colorize;
use gitpin_common::config::Config;
use gitpin_common::error::Result;
use gitpin_core::reporter::TraceReporter;
use gitpin_core::resolver::Resolver;
use gitpin_core::vcs::GitVcs;

use crate::cli::current_repository;

#[derive(clap::Args, Debug)]
pub struct Update;

impl Update {
    pub fn run(&self, config: &Config) -> Result<()> {
        let vcs = GitVcs::new();
        let (workspace, root) = current_repository(&vcs, config)?;
        tracing::debug!(
            "Updating {} in workspace {}",
            root.name(),
            workspace.root().display()
        );

        let reporter = TraceReporter;
        let resolver = Resolver::new(&workspace, &vcs, &reporter);
        let pinned = resolver.update(&root)?;

        if pinned.is_empty() {
            println!(
                "{}{}",
                "==> ".bold().blue(),
                "No dependencies declared, lock file removed".bold()
            );
        } else {
            println!(
                "{}{}",
                "==> ".bold().blue(),
                format!(
                    "Pinned {} dependencies in {}",
                    pinned.len(),
                    root.lock_path().display()
                )
                .bold()
            );
        }
        Ok(())
    }
}
