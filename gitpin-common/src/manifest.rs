// gitpin-common/src/manifest.rs
//! The `.gitpin` dependency declaration file.
//!
//! One directive per line: blank lines and `#` comments are ignored,
//! `program:`-prefixed lines declare executable paths (consumed by tooling
//! outside the resolution engine), and every other line is a dependency URL
//! with an optional `#revspec` fragment.
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{GitpinError, Result};
use crate::model::Dependency;

/// Parsed contents of a repository's declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub dependencies: Vec<Dependency>,
    pub programs: Vec<String>,
}

impl Manifest {
    pub fn parse_str(content: &str, path: &Path, config: &Config) -> Result<Self> {
        let mut dependencies = Vec::new();
        let mut programs = Vec::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();

            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if let Some(program) = line.strip_prefix(config.program_marker()) {
                let program = program.trim();
                if program.is_empty() {
                    return Err(GitpinError::Parse {
                        path: path.to_path_buf(),
                        line: index + 1,
                        text: raw_line.to_string(),
                        reason: "Expected program path".into(),
                    });
                }
                programs.push(program.to_string());
                continue;
            }

            let dependency =
                Dependency::parse_url(line, config.default_branch()).map_err(|e| {
                    GitpinError::Parse {
                        path: path.to_path_buf(),
                        line: index + 1,
                        text: raw_line.to_string(),
                        reason: format!("Invalid dependency URL: {e}"),
                    }
                })?;
            dependencies.push(dependency);
        }

        Ok(Self {
            dependencies,
            programs,
        })
    }

    /// Read and parse a declaration file. A missing file is an empty
    /// manifest, not an error.
    pub fn read(path: &Path, config: &Config) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse_str(&content, path, config)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config() -> Config {
        Config {
            default_branch: "master".into(),
        }
    }

    fn parse(content: &str) -> Result<Manifest> {
        Manifest::parse_str(content, &PathBuf::from(".gitpin"), &config())
    }

    #[test]
    fn parses_dependencies_in_declaration_order() {
        let manifest = parse(
            "# required repositories\n\
             \n\
             https://example.com/b.git#v1\n\
             https://example.com/c.git\n",
        )
        .unwrap();

        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies[0].name().unwrap().as_str(), "b");
        assert_eq!(manifest.dependencies[0].rev().as_str(), "v1");
        assert_eq!(manifest.dependencies[1].rev().as_str(), "master");
        assert!(manifest.programs.is_empty());
    }

    #[test]
    fn collects_program_declarations() {
        let manifest = parse(
            "program: tools/frob.exe\n\
             https://example.com/b.git\n",
        )
        .unwrap();

        assert_eq!(manifest.programs, vec!["tools/frob.exe".to_string()]);
        assert_eq!(manifest.dependencies.len(), 1);
    }

    #[test]
    fn malformed_url_names_line_and_text() {
        let err = parse("https://example.com/b.git\nnot a url\n").unwrap_err();
        match err {
            GitpinError::Parse { line, text, .. } => {
                assert_eq!(line, 2);
                assert_eq!(text, "not a url");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::read(&dir.path().join(".gitpin"), &config()).unwrap();
        assert_eq!(manifest, Manifest::default());
    }
}
