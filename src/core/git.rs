//! Git repository operations.
//!
//! [`GitRepo`] locates the repository. [`Git`] issues the ordered commands of
//! a run through a [`CommandRunner`]; every mutating call goes through
//! [`executor::run_checked`], which turns a nonzero exit into
//! [`Error::CommandFailed`] carrying the command's own exit code.

use crate::core::error::{Error, Result};
use crate::core::executor::{self, CommandOutput, CommandRunner, Invocation};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git program name.
const GIT: &str = "git";

/// Represents a Git repository.
#[derive(Debug, Clone)]
pub struct GitRepo {
    /// Root directory of the repository (where .git is).
    root: PathBuf,
}

impl GitRepo {
    /// Discovers the Git repository from the current directory.
    pub fn discover() -> Result<Self> {
        Self::discover_from(&std::env::current_dir().map_err(|e| Error::io("get current dir", e))?)
    }

    /// Discovers the Git repository from a specific path.
    pub fn discover_from(path: &Path) -> Result<Self> {
        let output = Command::new(GIT)
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::CommandNotFound {
                        command: GIT.to_string(),
                    }
                } else {
                    Error::io("run git rev-parse", e)
                }
            })?;

        if !output.status.success() {
            return Err(Error::NotGitRepo);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let root = stdout
            .lines()
            .next()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .ok_or(Error::NotGitRepo)?;

        Ok(Self { root })
    }

    /// Returns the root directory of the repository.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// One line of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Two-letter `XY` status code.
    pub code: String,
    /// Path as reported by git.
    pub path: String,
}

impl StatusEntry {
    /// Returns true for untracked files (`??`).
    #[must_use]
    pub fn is_untracked(&self) -> bool {
        self.code == "??"
    }

}

impl std::fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.path)
    }
}

/// Parses `git status --porcelain` (v1) output.
#[must_use]
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (code, path) = if line.len() > 3 && line.is_char_boundary(2) {
                (&line[..2], line[3..].trim())
            } else {
                (line.trim(), "")
            };
            StatusEntry {
                code: code.to_string(),
                path: path.to_string(),
            }
        })
        .collect()
}

/// Read-only view of the working tree, queried fresh each time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryState {
    /// Porcelain status entries.
    pub entries: Vec<StatusEntry>,
    /// Whether the index differs from HEAD.
    pub has_staged_changes: bool,
}

impl RepositoryState {
    /// Returns true if anything is modified, staged or untracked.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// Git command driver bound to a working directory.
#[derive(Clone, Copy)]
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    workdir: &'a Path,
}

impl std::fmt::Debug for Git<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git").field("workdir", &self.workdir).finish()
    }
}

impl<'a> Git<'a> {
    /// Creates a driver running commands in `workdir`.
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner, workdir: &'a Path) -> Self {
        Self { runner, workdir }
    }

    fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(GIT, self.workdir).args(args)
    }

    /// Runs an invocation through [`executor::run_checked`].
    pub async fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput> {
        executor::run_checked(self.runner, invocation).await
    }

    /// Returns porcelain status entries.
    pub async fn status(&self) -> Result<Vec<StatusEntry>> {
        let output = self
            .run_checked(&self.invocation(["status", "--porcelain"]))
            .await?;
        Ok(parse_porcelain(&output.stdout))
    }

    /// Returns true if the status report is non-empty after trimming.
    pub async fn is_working_tree_dirty(&self) -> Result<bool> {
        let output = self
            .run_checked(&self.invocation(["status", "--porcelain"]))
            .await?;
        Ok(!output.stdout.trim().is_empty())
    }

    /// Returns true if the index differs from HEAD.
    ///
    /// `git diff --cached --quiet` exits 1 when there is a difference; any
    /// other nonzero code is a failure.
    pub async fn has_staged_changes(&self) -> Result<bool> {
        let invocation = self.invocation(["diff", "--cached", "--quiet"]);
        tracing::debug!(command = %invocation, "running");
        let output = self.runner.run(&invocation).await?;

        match output.exit_code {
            0 => Ok(false),
            1 => Ok(true),
            code => Err(Error::command_failed(
                invocation.to_string(),
                code,
                output.stderr.trim(),
            )),
        }
    }

    /// Queries the full repository state.
    pub async fn state(&self) -> Result<RepositoryState> {
        let entries = self.status().await?;
        let has_staged_changes = self.has_staged_changes().await?;
        Ok(RepositoryState {
            entries,
            has_staged_changes,
        })
    }

    /// Creates `branch`, or resets it if it already exists, and checks it out.
    pub async fn checkout_reset(&self, branch: &str) -> Result<()> {
        self.run_checked(&self.invocation(["checkout", "-B", branch]))
            .await
            .map(drop)
    }

    /// Stages exactly the given paths.
    pub async fn add(&self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let invocation = self
            .invocation(["add", "--"])
            .args(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        self.run_checked(&invocation).await.map(drop)
    }

    /// Commits the index with `message`.
    pub async fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&self.invocation(["commit", "-m", message]))
            .await
            .map(drop)
    }

    /// Force-pushes `branch` to `remote` and sets upstream.
    pub async fn push(&self, remote: &str, branch: &str, no_verify: bool) -> Result<()> {
        let mut invocation = self.invocation(["push", "-u", remote, branch, "--force"]);
        if no_verify {
            invocation = invocation.arg("--no-verify");
        }
        self.run_checked(&invocation).await.map(drop)
    }
}
