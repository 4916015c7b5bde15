//! The draft pull request state machine.
//!
//! ```text
//! START -> dirty-check [ABORT: dirty] -> preflight [ABORT] -> branch-create -> write-artifact
//!       -> stage -> staged-check [DONE: nothing-to-do] -> commit
//!       -> push [ABORT] -> open-pr [ABORT] -> [DONE: success]
//! ```
//!
//! Each stage is awaited to completion before the next starts. Nothing is
//! rolled back on failure; a rerun uses a fresh branch name.

use crate::artifacts::ChangeProducer;
use crate::core::context::{BranchName, RunContext};
use crate::core::error::{Error, Result};
use crate::core::executor::{CommandRunner, Executor};
use crate::core::git::Git;
use crate::core::pr::{self, PullRequest};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Position in the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Working tree cleanliness check.
    DirtyCheck,
    /// Required tools are on `PATH`.
    Preflight,
    /// `git checkout -B`.
    CreateBranch,
    /// Change producer writes files.
    WriteArtifact,
    /// `git add` of the written paths.
    StageChanges,
    /// `git diff --cached --quiet`.
    StagedCheck,
    /// `git commit`.
    Commit,
    /// `git push`.
    Push,
    /// `gh pr create`.
    OpenPullRequest,
}

impl Stage {
    /// Returns a short name for the stage.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DirtyCheck => "dirty-check",
            Self::Preflight => "preflight",
            Self::CreateBranch => "branch-create",
            Self::WriteArtifact => "write-artifact",
            Self::StageChanges => "stage",
            Self::StagedCheck => "staged-check",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::OpenPullRequest => "open-pr",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Stage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Terminal state of a run.
#[derive(Debug)]
pub enum RunOutcome {
    /// The draft pull request was opened.
    Opened(PullRequest),
    /// Staging produced no diff; nothing was committed.
    NothingToDo {
        /// Branch that was created and left checked out.
        branch: BranchName,
    },
    /// The run stopped at `stage`.
    Aborted {
        /// Stage that failed.
        stage: Stage,
        /// Why it failed.
        error: Error,
    },
}

impl RunOutcome {
    /// Returns true for the two successful terminal states.
    #[must_use]
    pub const fn success(&self) -> bool {
        !matches!(self, Self::Aborted { .. })
    }

    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Opened(_) | Self::NothingToDo { .. } => 0,
            Self::Aborted { error, .. } => error.exit_code(),
        }
    }
}

/// Serializable summary of a [`RunOutcome`].
#[derive(Debug, Serialize)]
pub struct OutcomeReport<'a> {
    /// `opened`, `nothing-to-do` or `aborted`.
    pub status: &'static str,
    /// Process exit code.
    pub exit_code: i32,
    /// Pull request details when opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<&'a PullRequest>,
    /// Branch for the nothing-to-do state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<&'a BranchName>,
    /// Failing stage when aborted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    /// Error message when aborted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> From<&'a RunOutcome> for OutcomeReport<'a> {
    fn from(outcome: &'a RunOutcome) -> Self {
        let exit_code = outcome.exit_code();
        match outcome {
            RunOutcome::Opened(pr) => Self {
                status: "opened",
                exit_code,
                pull_request: Some(pr),
                branch: None,
                stage: None,
                error: None,
            },
            RunOutcome::NothingToDo { branch } => Self {
                status: "nothing-to-do",
                exit_code,
                pull_request: None,
                branch: Some(branch),
                stage: None,
                error: None,
            },
            RunOutcome::Aborted { stage, error } => Self {
                status: "aborted",
                exit_code,
                pull_request: None,
                branch: None,
                stage: Some(*stage),
                error: Some(error.to_string()),
            },
        }
    }
}

/// Sequential draft PR pipeline.
pub struct Pipeline<'a> {
    runner: &'a dyn CommandRunner,
    producer: &'a dyn ChangeProducer,
    required_tools: &'a [&'a str],
    progress: bool,
}

impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("producer", &self.producer.name())
            .field("required_tools", &self.required_tools)
            .field("progress", &self.progress)
            .finish()
    }
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline that runs commands through `runner` and writes
    /// its payload with `producer`.
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner, producer: &'a dyn ChangeProducer) -> Self {
        Self {
            runner,
            producer,
            required_tools: &[],
            progress: false,
        }
    }

    /// Programs that must be on `PATH` before anything is mutated.
    ///
    /// Checked after the dirty check, so a dirty tree still exits 1.
    #[must_use]
    pub const fn require_tools(mut self, tools: &'a [&'a str]) -> Self {
        self.required_tools = tools;
        self
    }

    /// Enables per-stage terminal output and spinners.
    #[must_use]
    pub const fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Runs every stage in order and returns the terminal state.
    pub async fn run(&self, ctx: &RunContext) -> RunOutcome {
        let git = Git::new(self.runner, ctx.workdir());

        // Nothing may be written before this check passes.
        if let Err(error) = self.check_clean(&git).await {
            return Self::abort(Stage::DirtyCheck, error);
        }

        if let Err(error) = self.check_tools() {
            return Self::abort(Stage::Preflight, error);
        }

        let branch = ctx.branch().as_str();
        if let Err(error) = self
            .step(Stage::CreateBranch, git.checkout_reset(branch))
            .await
        {
            return Self::abort(Stage::CreateBranch, error);
        }

        tracing::debug!(stage = %Stage::WriteArtifact, producer = self.producer.name(), "entering");
        let paths = match self.producer.produce(ctx) {
            Ok(paths) => paths,
            Err(error) => return Self::abort(Stage::WriteArtifact, error),
        };
        self.report(Stage::WriteArtifact, &format!("wrote {}", join_paths(&paths)));

        if let Err(error) = self.step(Stage::StageChanges, git.add(&paths)).await {
            return Self::abort(Stage::StageChanges, error);
        }

        tracing::debug!(stage = %Stage::StagedCheck, "entering");
        match git.has_staged_changes().await {
            Ok(true) => {},
            Ok(false) => {
                tracing::info!(branch, "staging produced no diff");
                return RunOutcome::NothingToDo {
                    branch: ctx.branch().clone(),
                };
            },
            Err(error) => return Self::abort(Stage::StagedCheck, error),
        }

        if let Err(error) = self
            .step(Stage::Commit, git.commit(ctx.commit_message()))
            .await
        {
            return Self::abort(Stage::Commit, error);
        }

        let push = ctx.push();
        let spinner = self.spinner(&format!("Pushing {branch} to {}...", push.remote));
        let pushed = self
            .step(Stage::Push, git.push(&push.remote, branch, push.no_verify))
            .await;
        spinner.finish_and_clear();
        if let Err(error) = pushed {
            return Self::abort(Stage::Push, error);
        }

        let spinner = self.spinner("Opening draft pull request...");
        let opened = self
            .step(Stage::OpenPullRequest, pr::open_draft(self.runner, ctx))
            .await;
        spinner.finish_and_clear();
        match opened {
            Ok(pull_request) => RunOutcome::Opened(pull_request),
            Err(error) => {
                tracing::warn!(branch, "branch was pushed but the pull request was not opened");
                Self::abort(Stage::OpenPullRequest, error)
            },
        }
    }

    /// Fails with [`Error::DirtyWorkingTree`] if the status report is non-empty.
    ///
    /// The entries are only fetched to build the error.
    async fn check_clean(&self, git: &Git<'_>) -> Result<()> {
        tracing::debug!(stage = %Stage::DirtyCheck, "entering");
        if !git.is_working_tree_dirty().await? {
            return Ok(());
        }
        let entries = git.status().await?;
        for entry in &entries {
            tracing::debug!(code = %entry.code, path = %entry.path, "uncommitted change");
        }
        Err(Error::DirtyWorkingTree {
            entries: entries.iter().map(ToString::to_string).collect(),
        })
    }

    fn check_tools(&self) -> Result<()> {
        tracing::debug!(stage = %Stage::Preflight, tools = ?self.required_tools, "entering");
        match self
            .required_tools
            .iter()
            .find(|tool| !Executor::command_exists(tool))
        {
            Some(tool) => Err(Error::CommandNotFound {
                command: (*tool).to_string(),
            }),
            None => Ok(()),
        }
    }

    async fn step<T, F>(&self, stage: Stage, fut: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        tracing::debug!(stage = %stage, "entering");
        let value = fut.await?;
        self.report(stage, "done");
        Ok(value)
    }

    fn report(&self, stage: Stage, message: &str) {
        if self.progress {
            eprintln!("{} {stage}: {message}", style("✓").green());
        }
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .ok()
                .unwrap_or_else(ProgressStyle::default_spinner),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn abort(stage: Stage, error: Error) -> RunOutcome {
        tracing::debug!(stage = %stage, error = %error, "aborting");
        RunOutcome::Aborted { stage, error }
    }
}

fn join_paths(paths: &[std::path::PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::marker::MarkerFile;
    use crate::config::Config;
    use crate::core::executor::{CommandOutput, Invocation, MockCommandRunner};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every invocation and answers from a list of prefix rules.
    #[derive(Debug, Default)]
    struct ScriptedRunner {
        rules: Vec<(&'static str, Vec<&'static str>, CommandOutput)>,
        calls: Mutex<Vec<Invocation>>,
    }

    impl ScriptedRunner {
        /// A clean repository where staging yields a diff and gh succeeds.
        fn clean_repo() -> Self {
            Self::default()
                .respond("git", &["diff", "--cached", "--quiet"], CommandOutput::with_code(1))
                .respond(
                    "gh",
                    &["pr", "create"],
                    CommandOutput {
                        stdout: "https://github.com/acme/app/pull/12\n".into(),
                        ..CommandOutput::default()
                    },
                )
        }

        /// Rules added later take precedence.
        fn respond(mut self, program: &'static str, words: &[&'static str], output: CommandOutput) -> Self {
            self.rules.insert(0, (program, words.to_vec(), output));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls
                .lock()
                .expect("lock calls")
                .iter()
                .map(ToString::to_string)
                .collect()
        }

        fn called(&self, program: &str, words: &[&str]) -> bool {
            self.calls
                .lock()
                .expect("lock calls")
                .iter()
                .any(|c| c.starts_with(program, words))
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
            self.calls
                .lock()
                .expect("lock calls")
                .push(invocation.clone());
            Ok(self
                .rules
                .iter()
                .find(|(program, words, _)| invocation.starts_with(program, words))
                .map(|(_, _, output)| output.clone())
                .unwrap_or_default())
        }
    }

    fn context(dir: &TempDir) -> RunContext {
        context_with(dir, Config::default())
    }

    fn context_with(dir: &TempDir, config: Config) -> RunContext {
        let now = Utc
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .expect("valid time");
        RunContext::new(&config, dir.path(), now)
    }

    fn is_mutating(call: &str) -> bool {
        ["git checkout", "git add", "git commit", "git push", "gh pr create"]
            .iter()
            .any(|prefix| call.starts_with(prefix))
    }

    #[tokio::test]
    async fn test_clean_tree_opens_draft_pr() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo();

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(matches!(&outcome, RunOutcome::Opened(pr)
            if pr.number == Some(12) && pr.head_branch == "audit-demo-20250101120000"
        ));
        assert_eq!(outcome.exit_code(), 0);

        assert_eq!(
            runner.calls(),
            vec![
                "git status --porcelain".to_string(),
                "git checkout -B audit-demo-20250101120000".to_string(),
                "git add -- _audit_demo.txt".to_string(),
                "git diff --cached --quiet".to_string(),
                r#"git commit -m "chore: automated draft PR (env-audit demo)""#.to_string(),
                "git push -u origin audit-demo-20250101120000 --force --no-verify".to_string(),
                r#"gh pr create --title "chore: automated draft PR (env-audit demo)" --body "chore: automated draft PR (env-audit demo)" --draft --base main"#.to_string(),
            ]
        );

        let content = std::fs::read_to_string(temp.path().join("_audit_demo.txt")).expect("read");
        assert!(content.contains("2025-01-01 12:00:00 UTC"));
    }

    #[tokio::test]
    async fn test_dirty_tree_aborts_without_mutation() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "git",
            &["status"],
            CommandOutput {
                stdout: " M src/main.rs\n".into(),
                ..CommandOutput::default()
            },
        );

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(matches!(
            &outcome,
            RunOutcome::Aborted {
                stage: Stage::DirtyCheck,
                error: Error::DirtyWorkingTree { entries }
            } if entries.len() == 1 && entries[0] == " M src/main.rs"
        ));
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(
            runner.calls(),
            vec![
                "git status --porcelain".to_string(),
                "git status --porcelain".to_string()
            ]
        );
        assert!(!runner.calls().iter().any(|c| is_mutating(c)));
        assert!(!temp.path().join("_audit_demo.txt").exists());
    }

    #[tokio::test]
    async fn test_dirty_tree_only_queries_status() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);

        // Any call other than the status query has no expectation and fails the test.
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.starts_with("git", &["status", "--porcelain"]))
            .times(2)
            .returning(|_| {
                Ok(CommandOutput {
                    stdout: "?? scratch.txt\n".into(),
                    ..CommandOutput::default()
                })
            });

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;
        assert_eq!(outcome.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_dirty_tree_wins_over_missing_tool() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "git",
            &["status"],
            CommandOutput {
                stdout: " M README.md\n".into(),
                ..CommandOutput::default()
            },
        );

        let outcome = Pipeline::new(&runner, &MarkerFile)
            .require_tools(&["definitely_not_a_real_command_12345"])
            .run(&ctx)
            .await;

        assert!(matches!(
            &outcome,
            RunOutcome::Aborted {
                stage: Stage::DirtyCheck,
                ..
            }
        ));
        assert_eq!(outcome.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_missing_tool_aborts_before_mutation() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo();

        let outcome = Pipeline::new(&runner, &MarkerFile)
            .require_tools(&["definitely_not_a_real_command_12345"])
            .run(&ctx)
            .await;

        assert!(matches!(
            &outcome,
            RunOutcome::Aborted {
                stage: Stage::Preflight,
                error: Error::CommandNotFound { command }
            } if command == "definitely_not_a_real_command_12345"
        ));
        assert_eq!(outcome.exit_code(), 127);
        assert_eq!(runner.calls(), vec!["git status --porcelain".to_string()]);
        assert!(!temp.path().join("_audit_demo.txt").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_present_tools_pass_preflight() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo();

        let outcome = Pipeline::new(&runner, &MarkerFile)
            .require_tools(&["sh"])
            .run(&ctx)
            .await;

        assert!(matches!(outcome, RunOutcome::Opened(_)));
    }

    #[tokio::test]
    async fn test_whitespace_only_status_is_clean() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "git",
            &["status"],
            CommandOutput {
                stdout: "\n  \n".into(),
                ..CommandOutput::default()
            },
        );

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;
        assert!(matches!(outcome, RunOutcome::Opened(_)));
    }

    #[tokio::test]
    async fn test_empty_staged_diff_is_nothing_to_do() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "git",
            &["diff", "--cached", "--quiet"],
            CommandOutput::with_code(0),
        );

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(matches!(&outcome, RunOutcome::NothingToDo { branch }
            if branch.as_str() == "audit-demo-20250101120000"));
        assert_eq!(outcome.exit_code(), 0);
        assert!(outcome.success());
        assert!(!runner.called("git", &["commit"]));
        assert!(!runner.called("git", &["push"]));
        assert!(!runner.called("gh", &["pr", "create"]));
    }

    #[rstest]
    #[case(1)]
    #[case(128)]
    #[tokio::test]
    async fn test_push_failure_propagates_exit_code(#[case] code: i32) {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "git",
            &["push"],
            CommandOutput {
                exit_code: code,
                stderr: "error: failed to push some refs\n".into(),
                ..CommandOutput::default()
            },
        );

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(matches!(
            &outcome,
            RunOutcome::Aborted { stage: Stage::Push, error: Error::CommandFailed { command, .. } }
                if command.starts_with("git push")
        ));
        assert_eq!(outcome.exit_code(), code);
        assert!(runner.called("git", &["commit"]));
        assert!(!runner.called("gh", &["pr", "create"]));
    }

    #[tokio::test]
    async fn test_pr_failure_leaves_branch_pushed() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "gh",
            &["pr", "create"],
            CommandOutput::with_code(4),
        );

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(matches!(
            &outcome,
            RunOutcome::Aborted {
                stage: Stage::OpenPullRequest,
                ..
            }
        ));
        assert_eq!(outcome.exit_code(), 4);
        assert!(runner.called("git", &["push"]));
    }

    #[tokio::test]
    async fn test_checkout_failure_writes_nothing() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "git",
            &["checkout"],
            CommandOutput::with_code(128),
        );

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(matches!(
            &outcome,
            RunOutcome::Aborted {
                stage: Stage::CreateBranch,
                ..
            }
        ));
        assert_eq!(outcome.exit_code(), 128);
        assert!(!temp.path().join("_audit_demo.txt").exists());
        assert!(!runner.called("git", &["add"]));
    }

    #[tokio::test]
    async fn test_status_query_failure_is_fatal() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context(&temp);
        let runner = ScriptedRunner::clean_repo().respond(
            "git",
            &["status"],
            CommandOutput {
                exit_code: 128,
                stderr: "fatal: not a git repository\n".into(),
                ..CommandOutput::default()
            },
        );

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(matches!(
            &outcome,
            RunOutcome::Aborted {
                stage: Stage::DirtyCheck,
                ..
            }
        ));
        assert_eq!(outcome.exit_code(), 128);
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_push_without_no_verify() {
        let temp = TempDir::new().expect("create temp dir");
        let mut config = Config::default();
        config.push.no_verify = false;
        config.push.remote = "upstream".to_string();
        let ctx = context_with(&temp, config);
        let runner = ScriptedRunner::clean_repo();

        let outcome = Pipeline::new(&runner, &MarkerFile).run(&ctx).await;

        assert!(outcome.success());
        assert!(runner
            .calls()
            .contains(&"git push -u upstream audit-demo-20250101120000 --force".to_string()));
    }

    #[tokio::test]
    async fn test_docs_producer_stages_both_files() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = context_with(&temp, Config::for_preset("docs"));
        let runner = ScriptedRunner::clean_repo();
        let producer = crate::artifacts::docs::DocsWithBadges;

        let outcome = Pipeline::new(&runner, &producer).run(&ctx).await;

        assert!(outcome.success());
        assert!(runner
            .calls()
            .contains(&"git add -- docs/agent-overview.md README.md".to_string()));
        assert!(runner
            .calls()
            .contains(&"git checkout -B agent-demo-20250101120000".to_string()));
    }

    #[test]
    fn test_outcome_report_json() {
        let outcome = RunOutcome::Aborted {
            stage: Stage::Push,
            error: Error::command_failed("git push", 128, ""),
        };
        let json = serde_json::to_value(OutcomeReport::from(&outcome)).expect("serialize");
        assert_eq!(json["status"], "aborted");
        assert_eq!(json["stage"], "push");
        assert_eq!(json["exit_code"], 128);
        assert!(json.get("pull_request").is_none());
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::DirtyCheck.to_string(), "dirty-check");
        assert_eq!(Stage::Preflight.to_string(), "preflight");
        assert_eq!(Stage::OpenPullRequest.to_string(), "open-pr");
        assert_eq!(
            serde_json::to_value(Stage::StageChanges).expect("serialize"),
            "stage"
        );
    }
}
