// gitpin-common/src/config.rs
use std::env;

use tracing::debug;

// Fallback when GITPIN_DEFAULT_BRANCH is not set or is empty.
const DEFAULT_BRANCH: &str = "master";
const MANIFEST_FILE_NAME: &str = ".gitpin";
const LOCK_FILE_NAME: &str = ".gitpin.lock";
const PROGRAM_MARKER: &str = "program:";

#[derive(Debug, Clone)]
pub struct Config {
    pub default_branch: String,
}

impl Config {
    pub fn load() -> Self {
        let default_branch = env::var("GITPIN_DEFAULT_BRANCH")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                debug!(
                    "GITPIN_DEFAULT_BRANCH not set or empty, falling back to default: {}",
                    DEFAULT_BRANCH
                );
                DEFAULT_BRANCH.to_string()
            });

        debug!("Effective default branch set to: {}", default_branch);
        Self { default_branch }
    }

    /// Revision specifier used when a dependency declaration omits one.
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Name of the per-repository dependency declaration file.
    pub fn manifest_file_name(&self) -> &str {
        MANIFEST_FILE_NAME
    }

    /// Name of the per-repository lock file.
    pub fn lock_file_name(&self) -> &str {
        LOCK_FILE_NAME
    }

    /// Prefix marking a manifest line as a program declaration rather than
    /// a dependency URL.
    pub fn program_marker(&self) -> &str {
        PROGRAM_MARKER
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load()
    }
}
