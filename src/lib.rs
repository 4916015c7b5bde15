//! # draft-pr
//!
//! Idempotent draft pull request automation for git working trees.
//!
//! A run refuses to start on a dirty tree, creates a timestamped branch,
//! writes a deterministic artifact, stages exactly those files, commits,
//! force-pushes and opens a draft pull request with the GitHub CLI. Each
//! precondition failure stops the run cleanly with a meaningful exit code.
//!
//! ## Example
//!
//! ```rust,no_run
//! use draft_pr::{artifacts, Config, Executor, GitRepo, Pipeline, RunContext};
//!
//! #[tokio::main]
//! async fn main() -> draft_pr::Result<()> {
//!     let config = Config::load_or_default()?;
//!     let repo = GitRepo::discover()?;
//!     let ctx = RunContext::new(&config, repo.root(), chrono::Utc::now());
//!
//!     let executor = Executor::new();
//!     let producer = artifacts::for_kind(config.artifact.kind);
//!     let outcome = Pipeline::new(&executor, producer.as_ref()).run(&ctx).await;
//!
//!     std::process::exit(outcome.exit_code());
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/draft-pr/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod core;
pub mod presets;

// Re-export main types for convenience
pub use config::Config;
pub use core::context::{BranchName, RunContext};
pub use core::error::{Error, Result};
pub use core::executor::{CommandRunner, Executor};
pub use core::git::GitRepo;
pub use core::pipeline::{Pipeline, RunOutcome, Stage};
