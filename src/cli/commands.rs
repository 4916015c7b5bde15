//! CLI command implementations.

use super::RunArgs;
use crate::artifacts;
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::core::context::{BranchName, RunContext};
use crate::core::error::{Error, Result};
use crate::core::executor::Executor;
use crate::core::git::{Git, GitRepo};
use crate::core::pipeline::{OutcomeReport, Pipeline, RunOutcome, Stage};
use crate::core::pr::GH;
use chrono::Utc;
use console::style;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Runs `future` to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create runtime: {e}"),
        })?;
    Ok(runtime.block_on(future))
}

/// Resolves the configuration for a run, applying command-line overrides.
fn resolve_config(args: &RunArgs) -> Result<Config> {
    let mut config = match args.preset.as_deref() {
        Some(preset) => Config::for_preset(preset),
        None => Config::load_or_default()?,
    };

    if let Some(base) = &args.base {
        config.pull_request.base.clone_from(base);
    }
    if let Some(prefix) = &args.prefix {
        config.branch.prefix.clone_from(prefix);
    }
    if let Some(remote) = &args.remote {
        config.push.remote.clone_from(remote);
    }

    config.validate()?;
    Ok(config)
}

/// Open a draft pull request.
pub fn run(args: &RunArgs, quiet: bool) -> Result<ExitCode> {
    let config = resolve_config(args)?;
    let repo = GitRepo::discover()?;
    let ctx = RunContext::new(&config, repo.root(), Utc::now());
    let chatty = !quiet && !args.json;

    if chatty {
        eprintln!(
            "{} Branch: {} (base: {})",
            style("•").cyan(),
            style(ctx.branch()).bold(),
            ctx.pull_request().base
        );
    }

    let executor = Executor::new();
    let producer = artifacts::for_kind(config.artifact.kind);
    let pipeline = Pipeline::new(&executor, producer.as_ref())
        .require_tools(&[GH])
        .with_progress(chatty);

    let start = Instant::now();
    let outcome = block_on(pipeline.run(&ctx))?;
    let elapsed = humantime::format_duration(std::time::Duration::from_secs(
        start.elapsed().as_secs(),
    ));

    if args.json {
        let json = serde_json::to_string_pretty(&OutcomeReport::from(&outcome)).map_err(|e| {
            Error::Internal {
                message: format!("Failed to serialize outcome: {e}"),
            }
        })?;
        println!("{json}");
    }

    print_outcome(&outcome, &ctx, chatty, &elapsed.to_string());

    Ok(super::exit_code(outcome.exit_code()))
}

/// Prints the terminal state of a run. Failures are always printed.
fn print_outcome(outcome: &RunOutcome, ctx: &RunContext, chatty: bool, elapsed: &str) {
    match outcome {
        RunOutcome::Opened(pr) => {
            if chatty {
                eprintln!();
                eprintln!(
                    "{} Draft PR created in {elapsed}: {}",
                    style("✓").green().bold(),
                    pr.url.as_deref().unwrap_or("review it on GitHub")
                );
            }
        },
        RunOutcome::NothingToDo { branch } => {
            if chatty {
                eprintln!(
                    "{} Nothing to commit on {branch}; the artifact matches HEAD.",
                    style("•").cyan()
                );
            }
        },
        RunOutcome::Aborted { stage, error } => {
            eprintln!("{} {error}", style("✗").red().bold());

            match error {
                Error::DirtyWorkingTree { entries } => {
                    for entry in entries.iter().take(20) {
                        eprintln!("    {entry}");
                    }
                    if entries.len() > 20 {
                        eprintln!("    ... and {} more", entries.len() - 20);
                    }
                },
                Error::CommandFailed { stderr, .. } => {
                    for line in stderr.lines().take(20) {
                        eprintln!("    {line}");
                    }
                },
                _ => {},
            }

            if *stage == Stage::OpenPullRequest {
                eprintln!(
                    "  Branch {} was pushed; open the pull request manually or rerun.",
                    ctx.branch()
                );
            }
        },
    }
}

/// Show the repository state.
pub fn check() -> Result<ExitCode> {
    let repo = GitRepo::discover()?;
    let executor = Executor::new();
    let state = block_on(Git::new(&executor, repo.root()).state())??;

    if state.is_dirty() {
        eprintln!(
            "{} Working tree is dirty ({} change(s)):",
            style("✗").red(),
            state.entries.len()
        );
        for entry in &state.entries {
            let code = if entry.is_untracked() {
                style(&entry.code).red()
            } else {
                style(&entry.code).yellow()
            };
            eprintln!("  {code} {}", entry.path);
        }
    } else {
        eprintln!("{} Working tree is clean", style("✓").green());
    }

    eprintln!(
        "Staged changes: {}",
        if state.has_staged_changes { "yes" } else { "no" }
    );

    Ok(if state.is_dirty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Print the branch name a run would use now.
pub fn branch_name(prefix: Option<&str>) -> Result<ExitCode> {
    let mut config = Config::load_or_default()?;
    if let Some(p) = prefix {
        config.branch.prefix = p.to_string();
    }
    config.validate()?;

    let name = BranchName::at(&config.branch.prefix, Utc::now());
    println!("{name}");

    Ok(ExitCode::SUCCESS)
}

/// Initialize configuration.
pub fn init(preset: Option<&str>, force: bool) -> Result<ExitCode> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    // Check if config already exists
    if config_path.exists() && !force {
        eprintln!(
            "{} Configuration already exists: {}",
            style("!").yellow(),
            config_path.display()
        );
        eprintln!("  Use --force to overwrite.");
        return Ok(ExitCode::FAILURE);
    }

    let config = preset.map_or_else(Config::default, Config::for_preset);

    let toml = toml::to_string_pretty(&config).map_err(|e| Error::Internal {
        message: format!("Failed to serialize config: {e}"),
    })?;

    std::fs::write(&config_path, toml).map_err(|e| Error::io("write config", e))?;

    eprintln!("{} Created {}", style("✓").green(), config_path.display());

    if let Some(p) = preset {
        eprintln!("  Using preset: {p} ({})", crate::presets::description(p));
    }

    eprintln!("\nNext steps:");
    eprintln!("  1. Review and customize {CONFIG_FILE_NAME}");
    eprintln!("  2. Commit it, so the working tree is clean");
    eprintln!("  3. Run: draft-pr");

    Ok(ExitCode::SUCCESS)
}

/// Validate configuration.
pub fn validate() -> Result<ExitCode> {
    match Config::load() {
        Ok(_) => {
            eprintln!("{} Configuration is valid", style("✓").green());
            Ok(ExitCode::SUCCESS)
        },
        Err(Error::ConfigNotFound { path }) => {
            eprintln!(
                "{} Configuration not found: {}",
                style("!").yellow(),
                path.display()
            );
            eprintln!("  Run: draft-pr init");
            Ok(ExitCode::FAILURE)
        },
        Err(e) => {
            eprintln!("{} Configuration validation failed: {e}", style("✗").red());
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Show configuration.
pub fn config(raw: bool) -> Result<ExitCode> {
    match Config::find_config_file() {
        Ok(path) => {
            eprintln!("Configuration file: {}", path.display());

            if raw {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io("read config", e))?;
                eprintln!();
                std::io::stdout()
                    .write_all(content.as_bytes())
                    .map_err(|e| Error::io("write output", e))?;
            }

            Ok(ExitCode::SUCCESS)
        },
        Err(Error::ConfigNotFound { .. }) => {
            eprintln!(
                "{} No configuration file found, using defaults",
                style("!").yellow()
            );
            if raw {
                std::io::stdout()
                    .write_all(Config::default_toml().as_bytes())
                    .map_err(|e| Error::io("write output", e))?;
            }
            Ok(ExitCode::SUCCESS)
        },
        Err(e) => Err(e),
    }
}

/// Generate shell completions.
pub fn completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    clap_complete::generate(
        shell,
        &mut super::Cli::command(),
        "draft-pr",
        &mut std::io::stdout(),
    );
}
