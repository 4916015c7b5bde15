//! Configuration handling for draft-pr.
//!
//! This module provides configuration loading and validation,
//! supporting `draft-pr.toml` files, a per-user config file and
//! sensible defaults.

use crate::core::error::{Error, Result};
use crate::presets;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "draft-pr.toml";

/// Directory name under the user config dir.
pub const USER_CONFIG_DIR: &str = "draft-pr";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Branch naming.
    pub branch: BranchConfig,
    /// Commit settings.
    pub commit: CommitConfig,
    /// Pull request settings.
    pub pull_request: PullRequestConfig,
    /// Push settings.
    pub push: PushConfig,
    /// Artifact the run commits.
    pub artifact: ArtifactConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_preset(presets::names::AUDIT)
    }
}

impl Config {
    /// Loads configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::find_config_file()?;
        Self::load_from(&path)
    }

    /// Loads configuration or returns defaults if not found.
    pub fn load_or_default() -> Result<Self> {
        match Self::find_config_file() {
            Ok(path) => Self::load_from(&path),
            Err(Error::ConfigNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io("read config", e))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config_parse_with_source("Failed to parse TOML", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Finds the configuration file.
    ///
    /// Searches up the directory tree from the current directory, then falls
    /// back to `<config dir>/draft-pr/config.toml`.
    pub fn find_config_file() -> Result<PathBuf> {
        let cwd = std::env::current_dir().map_err(|e| Error::io("get current dir", e))?;

        let mut current = cwd.as_path();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        if let Some(user_path) = Self::user_config_file() {
            if user_path.exists() {
                return Ok(user_path);
            }
        }

        Err(Error::ConfigNotFound {
            path: cwd.join(CONFIG_FILE_NAME),
        })
    }

    /// Returns the per-user configuration path, if the platform has one.
    #[must_use]
    pub fn user_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_prefix(&self.branch.prefix) {
            return Err(Error::config_invalid(
                "branch.prefix",
                format!(
                    "'{}' is not usable in a git branch name",
                    self.branch.prefix
                ),
            ));
        }

        require_non_empty("commit.message", &self.commit.message)?;
        require_non_empty("pull_request.base", &self.pull_request.base)?;
        require_non_empty("push.remote", &self.push.remote)?;
        if let Some(title) = &self.pull_request.title {
            require_non_empty("pull_request.title", title)?;
        }

        require_relative("artifact.marker_path", &self.artifact.marker_path)?;
        require_relative("artifact.doc_path", &self.artifact.doc_path)?;
        require_relative("artifact.readme_path", &self.artifact.readme_path)?;

        if !self.artifact.badges_heading.starts_with('#') {
            return Err(Error::config_invalid(
                "artifact.badges_heading",
                "must be a markdown heading",
            ));
        }

        Ok(())
    }

    /// Generates default configuration as a string.
    #[must_use]
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Generates configuration for a specific preset.
    ///
    /// Unknown names fall back to the `audit` preset.
    #[must_use]
    pub fn for_preset(preset: &str) -> Self {
        match preset {
            presets::names::DOCS => Self {
                branch: BranchConfig {
                    prefix: "agent-demo".to_string(),
                },
                commit: CommitConfig {
                    message: "docs: add agent overview + badges stub".to_string(),
                },
                pull_request: PullRequestConfig {
                    title: None,
                    body: Some(
                        "Adds initial docs/agent-overview.md and a badges section in README.\n\n\
                         Automated by draft-pr"
                            .to_string(),
                    ),
                    base: "main".to_string(),
                },
                push: PushConfig::default(),
                artifact: ArtifactConfig {
                    kind: ArtifactKind::Docs,
                    ..ArtifactConfig::default()
                },
            },
            _ => Self {
                branch: BranchConfig::default(),
                commit: CommitConfig::default(),
                pull_request: PullRequestConfig::default(),
                push: PushConfig::default(),
                artifact: ArtifactConfig::default(),
            },
        }
    }
}

/// Branch naming configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchConfig {
    /// Prefix before the timestamp.
    pub prefix: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            prefix: "audit-demo".to_string(),
        }
    }
}

/// Commit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Commit message.
    pub message: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            message: "chore: automated draft PR (env-audit demo)".to_string(),
        }
    }
}

/// Pull request configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestConfig {
    /// Title; defaults to the commit message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body; defaults to the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Base branch.
    pub base: String,
}

impl Default for PullRequestConfig {
    fn default() -> Self {
        Self {
            title: None,
            body: None,
            base: "main".to_string(),
        }
    }
}

/// Push configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Remote to push to.
    pub remote: String,
    /// Pass `--no-verify` to skip pre-push hooks.
    pub no_verify: bool,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            no_verify: true,
        }
    }
}

/// Which built-in change producer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A single timestamped marker file.
    #[default]
    Marker,
    /// An overview document plus a README badges section.
    Docs,
}

/// Artifact configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Producer to use.
    pub kind: ArtifactKind,
    /// Marker file path (marker kind).
    pub marker_path: PathBuf,
    /// First line of the marker file (marker kind).
    pub marker_text: String,
    /// Overview document path (docs kind).
    pub doc_path: PathBuf,
    /// README path (docs kind).
    pub readme_path: PathBuf,
    /// Heading that marks the badges section as present (docs kind).
    pub badges_heading: String,
    /// Title used when the README has to be created; defaults to the
    /// repository directory name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            kind: ArtifactKind::Marker,
            marker_path: PathBuf::from("_audit_demo.txt"),
            marker_text: "Automated draft PR marker".to_string(),
            doc_path: PathBuf::from("docs/agent-overview.md"),
            readme_path: PathBuf::from("README.md"),
            badges_heading: "## Project badges".to_string(),
            project_name: None,
        }
    }
}

/// Returns true if `prefix` can start a git branch name.
fn is_valid_prefix(prefix: &str) -> bool {
    let Ok(re) = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]*$") else {
        return false;
    };
    re.is_match(prefix)
        && !prefix.contains("..")
        && !prefix.contains("//")
        && !prefix.ends_with(".lock")
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::config_invalid(field, "must not be empty"));
    }
    Ok(())
}

fn require_relative(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::config_invalid(field, "must not be empty"));
    }
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(Error::config_invalid(
            field,
            format!("{} must be relative to the repository root", path.display()),
        ));
    }
    Ok(())
}
