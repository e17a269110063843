// gitpin/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::env;

use clap::{ArgAction, Parser, Subcommand};
use gitpin_common::config::Config;
use gitpin_common::error::{GitpinError, Result};
use gitpin_common::model::RepoName;
use gitpin_core::vcs::GitVcs;
use gitpin_core::workspace::{Repository, Workspace};

// Module declarations
pub mod restore;
pub mod update;

use crate::cli::restore::RestoreArgs;
use crate::cli::update::Update;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "gitpin", bin_name = "gitpin")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve declared dependencies afresh and rewrite the lock file
    Update(Update),
    /// Bring working copies to the state recorded in the lock file
    Restore(RestoreArgs),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Update(command) => command.run(config),
            Self::Restore(command) => command.run(config),
        }
    }
}

/// Locate the repository the current directory is in, and the workspace
/// around it (the working copy's parent directory).
pub fn current_repository(vcs: &GitVcs, config: &Config) -> Result<(Workspace, Repository)> {
    let cwd = env::current_dir()?;
    let workdir = GitVcs::find_containing_workdir(&cwd).ok_or(GitpinError::NotInRepository)?;

    let name = workdir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(GitpinError::NotInRepository)?;
    let name = RepoName::new(name)?;

    let root = workdir.parent().ok_or(GitpinError::NotInRepository)?;
    let workspace = Workspace::new(root, config.clone())?;
    let repository = workspace.get_repository(vcs, &name)?;
    Ok((workspace, repository))
}
