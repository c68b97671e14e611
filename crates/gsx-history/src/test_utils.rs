//! Shared test utilities for gsx-history
//!
//! `MemoryHistory` is an in-process history for exercising callers without
//! git; `GitRepo` builds throwaway git repositories for tests that need the
//! real thing.

use crate::error::{HistoryError, HistoryResult};
use crate::traits::{RevisionHistory, DEFAULT_REFERENCE};
use async_trait::async_trait;
use gsx_core::{RevisionId, SchemaSnapshot};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

struct MemoryCommit {
    id: RevisionId,
    files: HashMap<String, String>,
    touched: HashSet<String>,
}

/// In-memory linear history. `HEAD` is the latest commit.
#[derive(Default)]
pub struct MemoryHistory {
    commits: Mutex<Vec<MemoryCommit>>,
    resolve_calls: AtomicUsize,
    snapshot_calls: AtomicUsize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a commit writing `content` to `path`
    pub fn commit(&self, path: &str, content: &str) -> RevisionId {
        let mut commits = self.commits.lock().unwrap();
        let mut files = commits.last().map(|c| c.files.clone()).unwrap_or_default();
        files.insert(path.to_string(), content.to_string());
        let id = RevisionId::new(format!("{:040x}", commits.len() + 1));
        commits.push(MemoryCommit {
            id: id.clone(),
            files,
            touched: HashSet::from([path.to_string()]),
        });
        id
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RevisionHistory for MemoryHistory {
    async fn resolve(&self, reference: &str, path: &str) -> HistoryResult<RevisionId> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let commits = self.commits.lock().unwrap();

        let tip = if reference == DEFAULT_REFERENCE {
            commits.len()
        } else {
            commits
                .iter()
                .position(|c| c.id == reference)
                .map(|i| i + 1)
                .ok_or_else(|| HistoryError::Resolution {
                    reference: reference.to_string(),
                    message: "unknown revision".to_string(),
                })?
        };

        commits[..tip]
            .iter()
            .rev()
            .find(|c| c.touched.contains(path))
            .map(|c| c.id.clone())
            .ok_or_else(|| HistoryError::NotFound {
                revision: reference.to_string(),
                path: path.to_string(),
            })
    }

    async fn snapshot(&self, revision: &RevisionId, path: &str) -> HistoryResult<SchemaSnapshot> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        let commits = self.commits.lock().unwrap();

        let commit = commits
            .iter()
            .find(|c| &c.id == revision)
            .ok_or_else(|| HistoryError::Resolution {
                reference: revision.to_string(),
                message: "unknown revision".to_string(),
            })?;

        let content = commit
            .files
            .get(path)
            .ok_or_else(|| HistoryError::NotFound {
                revision: revision.to_string(),
                path: path.to_string(),
            })?;

        Ok(SchemaSnapshot::new(revision.clone(), path, content.clone()))
    }

    fn history_type(&self) -> &'static str {
        "memory"
    }
}

/// Throwaway git repository in a temp directory.
pub struct GitRepo {
    dir: tempfile::TempDir,
}

impl GitRepo {
    /// Initialise a repository, or `None` when git is not installed.
    pub fn init() -> Option<Self> {
        let available = Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !available {
            eprintln!("git not available, skipping");
            return None;
        }

        let repo = Self {
            dir: tempfile::TempDir::new().unwrap(),
        };
        repo.git(&["init", "-q"]);
        Some(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `path`, commit it, and return the new commit hash
    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> RevisionId {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, content).unwrap();
        self.git(&["add", path]);
        self.git(&[
            "-c",
            "user.name=gsx",
            "-c",
            "user.email=gsx@example.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-q",
            "-m",
            message,
        ]);
        RevisionId::new(self.git(&["rev-parse", "HEAD"]))
    }

    /// Append to `path` and commit, mirroring how schema files usually grow
    pub fn append_file(&self, path: &str, content: &str, message: &str) -> RevisionId {
        let existing = std::fs::read_to_string(self.dir.path().join(path)).unwrap_or_default();
        self.commit_file(path, &format!("{}{}", existing, content), message)
    }

    fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
