//! Command execution for external tools.
//!
//! Every `git` and `gh` invocation made during a run goes through the
//! [`CommandRunner`] trait. [`Executor`] is the process-backed
//! implementation; tests substitute their own.

use crate::core::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved through PATH.
    pub program: String,
    /// Arguments passed verbatim (no shell).
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Invocation {
    /// Creates an invocation of `program` in `cwd`.
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Returns true if the arguments start with the given words.
    #[must_use]
    pub fn starts_with(&self, program: &str, words: &[&str]) -> bool {
        self.program == program
            && self.args.len() >= words.len()
            && self.args.iter().zip(words).all(|(a, w)| a == w)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Output from a command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code of the command.
    pub exit_code: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Duration the command took to run.
    pub duration: Duration,
}

impl CommandOutput {
    /// Creates an output with the given exit code and no captured text.
    #[must_use]
    pub fn with_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    /// Returns true if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external commands.
///
/// Implementations report the exit status in [`CommandOutput`]; a nonzero
/// exit is not an `Err`. `Err` is reserved for failing to run the program
/// at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the invocation to completion.
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Runs an invocation, failing on any nonzero exit.
///
/// This is the single choke point for commands whose failure ends a run:
/// the returned [`Error::CommandFailed`] names the command and carries its
/// exit code unchanged.
pub async fn run_checked(
    runner: &dyn CommandRunner,
    invocation: &Invocation,
) -> Result<CommandOutput> {
    tracing::debug!(command = %invocation, "running");
    let output = runner.run(invocation).await?;
    tracing::debug!(
        command = %invocation,
        exit_code = output.exit_code,
        elapsed = ?output.duration,
        "finished"
    );

    if !output.success() {
        return Err(Error::command_failed(
            invocation.to_string(),
            output.exit_code,
            output.stderr.trim(),
        ));
    }

    Ok(output)
}

/// Process-backed command runner.
#[derive(Debug, Default)]
pub struct Executor;

impl Executor {
    /// Creates a new executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks if a command exists in PATH.
    #[must_use]
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }
}

#[async_trait]
impl CommandRunner for Executor {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let start = Instant::now();

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::CommandNotFound {
                        command: invocation.program.clone(),
                    }
                } else {
                    Error::io(format!("run {}", invocation.program), e)
                }
            })?;

        Ok(CommandOutput {
            // Killed by a signal: no code, report a generic failure.
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration: start.elapsed(),
        })
    }
}
