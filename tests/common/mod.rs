//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};
use patchmail::{CommandRunner, ShellCommand, ShellError};

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture file as a string.
pub fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Read a fixture file as lines, the way a command's stdout is split.
pub fn fixture_lines(name: &str) -> Vec<String> {
    patchmail::shell::split_output_lines(&read_fixture(name))
}

/// A kernel-like tree inside `<tmp>/linux`, so `<tmp>/PATCH` stays inside the temp dir.
pub struct TestTree {
    pub root: tempfile::TempDir,
    pub repo: PathBuf,
}

impl TestTree {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = root.path().join("linux");
        std::fs::create_dir_all(&repo).expect("Failed to create tree");
        Self { root, repo }
    }

    /// Create an empty file (and its parents) relative to the tree root.
    pub fn touch(&self, path: &str) -> &Self {
        let full = self.repo.join(path);
        std::fs::create_dir_all(full.parent().unwrap()).expect("Failed to create parents");
        std::fs::write(&full, "").expect("Failed to write file");
        self
    }

    /// Install a placeholder maintainer script.
    pub fn with_maintainer_script(&self) -> &Self {
        self.touch("scripts/get_maintainer.pl")
    }

    pub fn patch_dir(&self) -> PathBuf {
        self.root.path().join("PATCH")
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Commit a change to `path` with the given subject. Returns the commit OID.
    pub fn commit_file(&self, path: &str, subject: &str) -> Oid {
        let sig = self.signature();

        let file_path = self.dir.path().join(path);
        std::fs::create_dir_all(file_path.parent().unwrap()).expect("Failed to create parents");
        let content = format!(
            "{}\n{}",
            subject,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        std::fs::write(&file_path, content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, subject, &tree, &parents)
            .expect("Failed to create commit")
    }
}

/// Command runner returning canned output for git and the maintainer script.
///
/// `maintainers: None` makes the maintainer script fail to spawn.
pub struct CannedRunner {
    pub history: Vec<String>,
    pub maintainers: Option<Vec<String>>,
    pub calls: RefCell<Vec<ShellCommand>>,
}

impl CannedRunner {
    pub fn new(history: &[&str], maintainers: Option<&[&str]>) -> Self {
        let owned = |lines: &[&str]| lines.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            history: owned(history),
            maintainers: maintainers.map(owned),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for CannedRunner {
    fn run(&self, _workdir: &Path, command: &ShellCommand) -> Result<Vec<String>, ShellError> {
        self.calls.borrow_mut().push(command.clone());

        if command.args.first().map(String::as_str) == Some("log") {
            return Ok(self.history.clone());
        }
        match &self.maintainers {
            Some(lines) => Ok(lines.clone()),
            None => Err(ShellError::SpawnFailed {
                command: command.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}
