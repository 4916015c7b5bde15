//! Immutable per-run context.
//!
//! A [`RunContext`] is built once at process start from the loaded
//! configuration and the current UTC time, then passed by reference to
//! every stage of the pipeline.

use crate::config::{ArtifactConfig, Config};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// `chrono` format of the timestamp embedded in branch names.
pub const BRANCH_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// `chrono` format of the human-readable timestamp written into artifacts.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A branch name of the form `<prefix>-<YYYYmmddHHMMSS>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Derives the branch name for `prefix` at time `at`.
    ///
    /// Two calls within the same UTC second yield the same name.
    #[must_use]
    pub fn at(prefix: &str, at: DateTime<Utc>) -> Self {
        Self(format!("{prefix}-{}", at.format(BRANCH_TIMESTAMP_FORMAT)))
    }

    /// Parses an existing name, checking it has the `<prefix>-<14 digits>` shape.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9._/-]+-\d{14}$").ok());
        pattern
            .as_ref()
            .filter(|re| re.is_match(name))
            .map(|_| Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pull request fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSpec {
    /// PR title.
    pub title: String,
    /// PR body.
    pub body: String,
    /// Base branch the PR targets.
    pub base: String,
}

/// Push settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSpec {
    /// Remote name.
    pub remote: String,
    /// Skip pre-push hooks.
    pub no_verify: bool,
}

/// Everything a run needs, fixed at start.
#[derive(Debug, Clone)]
pub struct RunContext {
    now: DateTime<Utc>,
    workdir: PathBuf,
    branch: BranchName,
    commit_message: String,
    pull_request: PullRequestSpec,
    push: PushSpec,
    artifact: ArtifactConfig,
}

impl RunContext {
    /// Builds the context for a run in `workdir` at time `now`.
    #[must_use]
    pub fn new(config: &Config, workdir: impl Into<PathBuf>, now: DateTime<Utc>) -> Self {
        let title = config
            .pull_request
            .title
            .clone()
            .unwrap_or_else(|| config.commit.message.clone());
        let body = config
            .pull_request
            .body
            .clone()
            .unwrap_or_else(|| title.clone());

        Self {
            now,
            workdir: workdir.into(),
            branch: BranchName::at(&config.branch.prefix, now),
            commit_message: config.commit.message.clone(),
            pull_request: PullRequestSpec {
                title,
                body,
                base: config.pull_request.base.clone(),
            },
            push: PushSpec {
                remote: config.push.remote.clone(),
                no_verify: config.push.no_verify,
            },
            artifact: config.artifact.clone(),
        }
    }

    /// Human-readable start time, second precision.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.now.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
    }

    /// Repository root all paths are relative to.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Branch created by this run.
    #[must_use]
    pub const fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Commit message.
    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    /// Pull request fields.
    #[must_use]
    pub const fn pull_request(&self) -> &PullRequestSpec {
        &self.pull_request
    }

    /// Push settings.
    #[must_use]
    pub const fn push(&self) -> &PushSpec {
        &self.push
    }

    /// Artifact settings.
    #[must_use]
    pub const fn artifact(&self) -> &ArtifactConfig {
        &self.artifact
    }
}
