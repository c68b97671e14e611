//! Git-backed revision history

use crate::error::{HistoryError, HistoryResult};
use crate::traits::RevisionHistory;
use async_trait::async_trait;
use gsx_core::{RevisionId, SchemaSnapshot};
use std::path::PathBuf;

/// git stderr fragments meaning "the path is not in this tree"
const PATH_MISSING_MARKERS: &[&str] = &["does not exist in", "exists on disk, but not in"];

/// Revision history backed by a git working tree.
///
/// Every operation spawns one `git` process in the workspace directory; paths
/// are interpreted relative to the workspace.
pub struct GitHistory {
    workspace: PathBuf,
    program: String,
}

/// Captured output of a finished git process
struct GitOutput {
    success: bool,
    stdout: Vec<u8>,
    stderr: String,
}

impl GitHistory {
    /// Create a history rooted at `workspace` (empty path = current directory)
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn run_git(&self, args: &[&str]) -> HistoryResult<GitOutput> {
        log::debug!("{} {}", self.program, args.join(" "));

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(args).kill_on_drop(true);
        if !self.workspace.as_os_str().is_empty() {
            cmd.current_dir(&self.workspace);
        }

        let output = cmd.output().await.map_err(|e| HistoryError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Reject references git would parse as options
fn validate_reference(reference: &str) -> HistoryResult<()> {
    if reference.trim().is_empty() || reference.starts_with('-') {
        return Err(HistoryError::Resolution {
            reference: reference.to_string(),
            message: "not a valid revision reference".to_string(),
        });
    }
    Ok(())
}

/// Strip a leading `./` so the path can be re-anchored for `git show`
fn normalize_path(path: &str) -> &str {
    path.trim_start_matches("./")
}

#[async_trait]
impl RevisionHistory for GitHistory {
    async fn resolve(&self, reference: &str, path: &str) -> HistoryResult<RevisionId> {
        validate_reference(reference)?;
        let path = normalize_path(path);

        let output = self
            .run_git(&["log", "-n", "1", "--pretty=format:%H", reference, "--", path])
            .await?;

        if !output.success {
            return Err(HistoryError::Resolution {
                reference: reference.to_string(),
                message: output.stderr,
            });
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let revision = RevisionId::try_new(hash).ok_or_else(|| HistoryError::NotFound {
            revision: reference.to_string(),
            path: path.to_string(),
        })?;

        log::debug!("Resolved {} ({}) to {}", reference, path, revision);
        Ok(revision)
    }

    async fn snapshot(&self, revision: &RevisionId, path: &str) -> HistoryResult<SchemaSnapshot> {
        validate_reference(revision.as_str())?;
        let path = normalize_path(path);
        let object = format!("{}:./{}", revision, path);

        let output = self.run_git(&["show", &object]).await?;

        if !output.success {
            if PATH_MISSING_MARKERS
                .iter()
                .any(|marker| output.stderr.contains(marker))
            {
                return Err(HistoryError::NotFound {
                    revision: revision.to_string(),
                    path: path.to_string(),
                });
            }
            return Err(HistoryError::Resolution {
                reference: revision.to_string(),
                message: output.stderr,
            });
        }

        let content = String::from_utf8(output.stdout).map_err(|_| HistoryError::InvalidUtf8 {
            revision: revision.to_string(),
            path: path.to_string(),
        })?;

        Ok(SchemaSnapshot::new(revision.clone(), path, content))
    }

    fn history_type(&self) -> &'static str {
        "git"
    }
}

#[cfg(test)]
#[path = "git_test.rs"]
mod tests;
