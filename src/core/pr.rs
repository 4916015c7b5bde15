//! Draft pull request creation through the GitHub CLI.

use crate::core::context::RunContext;
use crate::core::error::Result;
use crate::core::executor::{run_checked, CommandRunner, Invocation};
use serde::Serialize;

/// GitHub CLI program name.
pub const GH: &str = "gh";

/// Information about a created pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    /// PR URL as printed by `gh`, if it printed one.
    pub url: Option<String>,
    /// PR number parsed from the URL.
    pub number: Option<u64>,
    /// PR title.
    pub title: String,
    /// Target branch.
    pub base_branch: String,
    /// Source branch.
    pub head_branch: String,
}

/// Builds the `gh pr create` invocation for a run.
///
/// The head branch is left for `gh` to infer from the checked-out branch.
#[must_use]
pub fn create_invocation(ctx: &RunContext) -> Invocation {
    let pr = ctx.pull_request();
    Invocation::new(GH, ctx.workdir()).args([
        "pr",
        "create",
        "--title",
        pr.title.as_str(),
        "--body",
        pr.body.as_str(),
        "--draft",
        "--base",
        pr.base.as_str(),
    ])
}

/// Opens a draft pull request for the current branch.
///
/// Fails with the command's exit code if `gh` does. The pushed branch is
/// left in place in that case.
pub async fn open_draft(runner: &dyn CommandRunner, ctx: &RunContext) -> Result<PullRequest> {
    let invocation = create_invocation(ctx);
    let output = run_checked(runner, &invocation).await?;

    let url = parse_url(&output.stdout);
    let number = url.as_deref().and_then(parse_number);

    Ok(PullRequest {
        url,
        number,
        title: ctx.pull_request().title.clone(),
        base_branch: ctx.pull_request().base.clone(),
        head_branch: ctx.branch().to_string(),
    })
}

/// Returns the last `http(s)://` line of `gh` output.
fn parse_url(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .rev()
        .find(|l| l.starts_with("https://") || l.starts_with("http://"))
        .map(ToString::to_string)
}

/// Extracts the number from `.../pull/<n>`.
fn parse_number(url: &str) -> Option<u64> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::error::Error;
    use crate::core::executor::{CommandOutput, MockCommandRunner};
    use chrono::{TimeZone, Utc};

    fn context() -> RunContext {
        let now = Utc
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .expect("valid time");
        RunContext::new(&Config::default(), "/repo", now)
    }

    #[test]
    fn test_create_invocation_is_draft_against_base() {
        let inv = create_invocation(&context());
        assert_eq!(inv.program, "gh");
        assert_eq!(
            inv.args,
            vec![
                "pr",
                "create",
                "--title",
                "chore: automated draft PR (env-audit demo)",
                "--body",
                "chore: automated draft PR (env-audit demo)",
                "--draft",
                "--base",
                "main",
            ]
        );
    }

    #[test]
    fn test_parse_url_and_number() {
        let out = "Creating draft pull request for x into main\n\nhttps://github.com/o/r/pull/42\n";
        let url = parse_url(out).expect("url");
        assert_eq!(url, "https://github.com/o/r/pull/42");
        assert_eq!(parse_number(&url), Some(42));
    }

    #[test]
    fn test_parse_url_missing() {
        assert_eq!(parse_url("warning: something\n"), None);
        assert_eq!(parse_number("https://github.com/o/r/pull/abc"), None);
    }

    #[tokio::test]
    async fn test_open_draft_success() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.starts_with("gh", &["pr", "create"]))
            .times(1)
            .returning(|_| {
                Ok(CommandOutput {
                    stdout: "https://github.com/o/r/pull/7\n".into(),
                    ..CommandOutput::default()
                })
            });

        let pr = open_draft(&runner, &context()).await.expect("open");
        assert_eq!(pr.number, Some(7));
        assert_eq!(pr.head_branch, "audit-demo-20250101120000");
        assert_eq!(pr.base_branch, "main");
    }

    #[tokio::test]
    async fn test_open_draft_failure_keeps_exit_code() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Ok(CommandOutput {
                exit_code: 4,
                stderr: "gh: To get started with GitHub CLI, please run: gh auth login\n".into(),
                ..CommandOutput::default()
            })
        });

        let err = open_draft(&runner, &context()).await.expect_err("gh fails");
        assert_eq!(err.exit_code(), 4);
        assert!(matches!(&err, Error::CommandFailed { command, .. } if command.starts_with("gh pr create")));
    }
}
