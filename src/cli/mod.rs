//! Command-line interface for draft-pr.
//!
//! This module provides the `draft-pr` CLI with subcommands for:
//! - `run`: Open a draft pull request (the default)
//! - `check`: Show the repository state without changing anything
//! - `branch-name`: Print the branch name a run would use now
//! - `init`: Initialize configuration
//! - `validate`: Validate configuration
//! - `config`: Show configuration
//! - `completions`: Generate shell completions

mod commands;

use crate::core::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Idempotent draft pull request automation.
#[derive(Debug, Parser)]
#[command(
    name = "draft-pr",
    author,
    version,
    about = "Idempotent draft pull request automation",
    long_about = r#"
draft-pr opens a draft pull request from a clean git working tree.

A run refuses to start on a dirty tree, creates a timestamped branch
(<prefix>-YYYYmmddHHMMSS), writes a deterministic artifact, stages exactly
those files, commits, force-pushes and runs `gh pr create --draft`.

Quick start:
  draft-pr init            # Create draft-pr.toml
  draft-pr check           # Is the tree clean?
  draft-pr                 # Open the draft PR

Exit codes:
  0    Draft PR opened, or nothing to commit
  1    Working tree is dirty
  N    A git/gh command failed with exit code N
  65   Not inside a git repository
  78   Invalid configuration
  127  git or gh not found on PATH
"#,
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use color output.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Always use color.
    Always,
    /// Auto-detect color support.
    #[default]
    Auto,
    /// Never use color.
    Never,
}

/// Options for the `run` subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct RunArgs {
    /// Start from a preset instead of the configuration file.
    #[arg(short, long, value_parser = clap::builder::PossibleValuesParser::new(crate::presets::available().iter().copied()))]
    pub preset: Option<String>,

    /// Base branch for the pull request.
    #[arg(short, long)]
    pub base: Option<String>,

    /// Branch name prefix.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Remote to push to.
    #[arg(long)]
    pub remote: Option<String>,

    /// Print the outcome as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open a draft pull request.
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Show the repository state without changing anything.
    #[command(visible_alias = "c")]
    Check,

    /// Print the branch name a run would use now.
    BranchName {
        /// Branch name prefix.
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Initialize draft-pr configuration.
    #[command(visible_alias = "i")]
    Init {
        /// Use a preset configuration.
        #[arg(short, long, value_parser = clap::builder::PossibleValuesParser::new(crate::presets::available().iter().copied()))]
        preset: Option<String>,

        /// Overwrite existing configuration.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration file.
    #[command(visible_alias = "v")]
    Validate,

    /// Show configuration file location and contents.
    Config {
        /// Output raw TOML.
        #[arg(long)]
        raw: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Runs the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.verbose, cli.quiet);

    // Set up color
    setup_color(cli.color);

    // If no subcommand, run the default action (same as `draft-pr run`)
    match cli.command {
        Some(Commands::Run(args)) => commands::run(&args, cli.quiet),
        Some(Commands::Check) => commands::check(),
        Some(Commands::BranchName { prefix }) => commands::branch_name(prefix.as_deref()),
        Some(Commands::Init { preset, force }) => commands::init(preset.as_deref(), force),
        Some(Commands::Validate) => commands::validate(),
        Some(Commands::Config { raw }) => commands::config(raw),
        Some(Commands::Completions { shell }) => {
            commands::completions(shell);
            Ok(ExitCode::SUCCESS)
        },
        None => commands::run(&RunArgs::default(), cli.quiet),
    }
}

/// Converts a process exit code into an [`ExitCode`].
#[must_use]
pub fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(exit_status(code))
}

/// Prints a fatal error and returns the matching exit code.
///
/// Errors the user cannot fix by changing their repository or
/// configuration get a pointer to the debug log.
pub fn report_error(error: &Error) -> ExitCode {
    eprintln!("Error: {error}");
    if let Some(hint) = error_hint(error) {
        eprintln!("  {hint}");
    }
    exit_code(error.exit_code())
}

fn error_hint(error: &Error) -> Option<&'static str> {
    (!error.is_user_error()).then_some("Rerun with --verbose (or RUST_LOG=debug) for details.")
}

/// Codes outside `0..=255` map to 1.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

/// Sets up logging based on verbosity flags.
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sets up color output.
fn setup_color(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        },
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        },
        ColorChoice::Auto => {
            // Let console crate auto-detect
        },
    }
}
