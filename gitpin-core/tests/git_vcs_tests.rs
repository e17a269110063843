//! GitVcs tests against real repositories built in temp directories.
use std::fs;
use std::path::{Path, PathBuf};

use git2::{Repository as Git2Repository, RepositoryInitOptions, Signature};
use gitpin_common::error::GitpinError;
use gitpin_common::model::{CommitId, RepoUrl};
use gitpin_core::vcs::{GitVcs, Vcs};
use tempfile::TempDir;

fn init_repo(path: &Path) -> Git2Repository {
    let mut options = RepositoryInitOptions::new();
    options.initial_head("master");
    Git2Repository::init_opts(path, &options).unwrap()
}

fn commit_file(repo: &Git2Repository, file: &str, content: &str, message: &str) -> git2::Oid {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(file), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let signature = Signature::now("Test", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap()
}

struct SourceRepo {
    _dir: TempDir,
    path: PathBuf,
    repo: Git2Repository,
}

impl SourceRepo {
    fn new(name: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        fs::create_dir_all(&path).unwrap();
        let repo = init_repo(&path);
        Self {
            _dir: dir,
            path,
            repo,
        }
    }

    fn url(&self) -> RepoUrl {
        RepoUrl::parse(&format!("file://{}", self.path.display())).unwrap()
    }
}

fn commit_id(oid: git2::Oid) -> CommitId {
    CommitId::new(&oid.to_string()).unwrap()
}

#[test]
fn clone_resolves_and_detects_repositories() {
    let source = SourceRepo::new("widget");
    let head = commit_file(&source.repo, "README", "widget", "initial");

    let workspace = TempDir::new().unwrap();
    let vcs = GitVcs::new();
    assert!(!vcs.is_repository(&workspace.path().join("widget")));

    vcs.clone_repository(workspace.path(), &source.url()).unwrap();
    let workdir = workspace.path().join("widget");
    assert!(vcs.is_repository(&workdir));
    assert_eq!(vcs.resolve_commit(&workdir, "HEAD").unwrap(), commit_id(head));
}

#[test]
fn dirty_means_modified_tracked_files_not_untracked_ones() {
    let source = SourceRepo::new("widget");
    commit_file(&source.repo, "README", "one", "initial");

    let workspace = TempDir::new().unwrap();
    let vcs = GitVcs::new();
    vcs.clone_repository(workspace.path(), &source.url()).unwrap();
    let workdir = workspace.path().join("widget");

    assert!(!vcs.has_uncommitted_changes(&workdir).unwrap());

    fs::write(workdir.join("scratch.txt"), "untracked").unwrap();
    assert!(!vcs.has_uncommitted_changes(&workdir).unwrap());

    fs::write(workdir.join("README"), "modified").unwrap();
    assert!(vcs.has_uncommitted_changes(&workdir).unwrap());
}

#[test]
fn checkout_by_tag_detaches_and_ancestry_is_directional() {
    let source = SourceRepo::new("widget");
    let first = commit_file(&source.repo, "README", "one", "first");
    source
        .repo
        .tag_lightweight("v1", &source.repo.find_object(first, None).unwrap(), false)
        .unwrap();
    let second = commit_file(&source.repo, "README", "two", "second");

    let workspace = TempDir::new().unwrap();
    let vcs = GitVcs::new();
    vcs.clone_repository(workspace.path(), &source.url()).unwrap();
    let workdir = workspace.path().join("widget");

    assert_eq!(vcs.resolve_commit(&workdir, "v1").unwrap(), commit_id(first));

    vcs.checkout(&workdir, "v1").unwrap();
    assert_eq!(vcs.resolve_commit(&workdir, "HEAD").unwrap(), commit_id(first));
    assert_eq!(fs::read_to_string(workdir.join("README")).unwrap(), "one");

    assert!(vcs
        .is_ancestor(&workdir, &commit_id(first), &commit_id(second))
        .unwrap());
    assert!(!vcs
        .is_ancestor(&workdir, &commit_id(second), &commit_id(first))
        .unwrap());

    // And back to the tip by exact id
    vcs.checkout(&workdir, &second.to_string()).unwrap();
    assert_eq!(vcs.resolve_commit(&workdir, "HEAD").unwrap(), commit_id(second));
}

#[test]
fn checkout_of_a_remote_only_branch_creates_the_local_branch() {
    let source = SourceRepo::new("widget");
    let first = commit_file(&source.repo, "README", "one", "first");
    {
        let commit = source.repo.find_commit(first).unwrap();
        source.repo.branch("dev", &commit, false).unwrap();
    }
    commit_file(&source.repo, "README", "two", "second");

    let workspace = TempDir::new().unwrap();
    let vcs = GitVcs::new();
    vcs.clone_repository(workspace.path(), &source.url()).unwrap();
    let workdir = workspace.path().join("widget");

    // Fresh clones only materialise the default branch locally
    let clone = Git2Repository::open(&workdir).unwrap();
    assert!(clone.find_branch("dev", git2::BranchType::Local).is_err());
    drop(clone);

    vcs.checkout(&workdir, "dev").unwrap();
    assert_eq!(vcs.resolve_commit(&workdir, "HEAD").unwrap(), commit_id(first));

    let clone = Git2Repository::open(&workdir).unwrap();
    assert!(clone.find_branch("dev", git2::BranchType::Local).is_ok());
    assert_eq!(clone.head().unwrap().shorthand(), Some("dev"));
}

#[test]
fn checkout_refuses_a_dirty_working_copy() {
    let source = SourceRepo::new("widget");
    let first = commit_file(&source.repo, "README", "one", "first");
    commit_file(&source.repo, "README", "two", "second");

    let workspace = TempDir::new().unwrap();
    let vcs = GitVcs::new();
    vcs.clone_repository(workspace.path(), &source.url()).unwrap();
    let workdir = workspace.path().join("widget");

    fs::write(workdir.join("README"), "local edits").unwrap();
    let err = vcs.checkout(&workdir, &first.to_string()).unwrap_err();
    assert!(matches!(err, GitpinError::UncommittedChanges(ref name) if name == "widget"));
}

#[test]
fn workdir_discovery_finds_the_enclosing_working_copy() {
    let source = SourceRepo::new("widget");
    commit_file(&source.repo, "README", "one", "first");

    let nested = source.path.join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let found = GitVcs::find_containing_workdir(&nested).unwrap();
    assert_eq!(found.canonicalize().unwrap(), source.path.canonicalize().unwrap());

    let outside = TempDir::new().unwrap();
    assert!(GitVcs::find_containing_workdir(outside.path()).is_none());
}
