//! `gai submit`: PR title and body from the branch diff, confirm, `gh pr create`.

use tracing::debug;

use crate::error::WorkflowError;
use crate::llm::{ArtifactKind, parse_pr_summary};
use crate::shell::CommandSpec;

use super::{ConfirmPolicy, Context, Outcome, check_applied};

pub const PR_TOOL: &str = "gh";
const PR_TOOL_HINT: &str =
    "Please install it to use the 'submit' command. See: https://cli.github.com/";
pub const SUBMITTED: &str = "✅ Pull request submitted successfully.";
const CONFIRM_PROMPT: &str = "Use this title and body? [Y/n]";

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitRequest<'a> {
    pub yes: bool,
    pub extra: &'a [String],
}

/// `gh pr create --title T --body B [extra…]`
pub fn pr_create_args(title: &str, body: &str, extra: &[String]) -> Vec<String> {
    let mut args: Vec<String> = ["pr", "create", "--title", title, "--body", body]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    args.extend(extra.iter().cloned());
    args
}

pub async fn run_submit(
    ctx: &Context<'_>,
    request: SubmitRequest<'_>,
) -> Result<Outcome, WorkflowError> {
    let policy = ConfirmPolicy::resolve("submit", false, request.yes, ctx.stdin_is_terminal)?;

    if !ctx.runner.is_installed(PR_TOOL) {
        return Err(WorkflowError::ToolMissing {
            tool: PR_TOOL.to_string(),
            hint: PR_TOOL_HINT.to_string(),
        });
    }

    let diff = ctx.git().diff_against_default_branch()?;
    if diff.trim().is_empty() {
        return Err(WorkflowError::NothingToSubmit);
    }

    let artifact = ctx.generate(ArtifactKind::PrSummary, &diff).await?;
    let summary =
        parse_pr_summary(&artifact.text).map_err(|e| WorkflowError::MalformedResponse {
            reason: e.to_string(),
            raw: artifact.text.clone(),
        })?;

    println!("\nSuggested PR title:\n");
    println!("{}", summary.title);
    println!("\nSuggested PR body:\n");
    println!("{}\n", summary.body);

    if !ctx.approve(policy, CONFIRM_PROMPT)? {
        debug!("PR summary declined");
        return Ok(Outcome::Declined);
    }

    let spec = CommandSpec::new(
        PR_TOOL,
        pr_create_args(&summary.title, &summary.body, request.extra),
    );
    let result = check_applied("Pull request creation", ctx.runner.execute(&spec)?)?;

    let url = result.stdout.trim();
    if url.is_empty() {
        Ok(Outcome::Applied(SUBMITTED.to_string()))
    } else {
        Ok(Outcome::Applied(format!("{SUBMITTED}\n{url}")))
    }
}
