//! `gai commit`: message from the staged diff, confirm, `git commit -F -`.

use tracing::debug;

use crate::cli::rewrite_output;
use crate::error::WorkflowError;
use crate::llm::ArtifactKind;

use super::hooks::prepare_commit_hooks;
use super::{Artifact, ConfirmPolicy, Context, Outcome, check_applied};

pub const NO_STAGED_CHANGES: &str = "⚠️ No staged changes found.";
pub const COMMIT_SUCCESSFUL: &str = "✅ Commit successful.";
const CONFIRM_PROMPT: &str = "Use this commit message? [Y/n]";

#[derive(Debug, Clone, Copy, Default)]
pub struct CommitRequest<'a> {
    pub yes: bool,
    pub message: Option<&'a str>,
    pub date: Option<&'a str>,
    pub extra: &'a [String],
}

pub async fn run_commit(
    ctx: &Context<'_>,
    request: CommitRequest<'_>,
) -> Result<Outcome, WorkflowError> {
    let policy = ConfirmPolicy::resolve(
        "commit",
        request.message.is_some(),
        request.yes,
        ctx.stdin_is_terminal,
    )?;
    prepare_commit_hooks(ctx);
    let git = ctx.git();

    let artifact = match request.message {
        Some(message) => Artifact::user_provided(ArtifactKind::CommitMessage, message),
        None => {
            let diff = git.staged_diff(request.extra)?;
            if diff.trim().is_empty() {
                return Ok(Outcome::NoOp(NO_STAGED_CHANGES.to_string()));
            }
            let artifact = ctx.generate(ArtifactKind::CommitMessage, &diff).await?;
            println!("\nSuggested commit message:\n");
            println!("{}\n", artifact.text);
            artifact
        }
    };

    if !ctx.approve(policy, CONFIRM_PROMPT)? {
        debug!("Commit message declined");
        return Ok(Outcome::Declined);
    }

    let result = git.commit(&artifact.text, request.date, request.extra)?;
    let result = check_applied("Commit", result)?;
    if !result.stdout.trim().is_empty() {
        println!("{}", rewrite_output(result.stdout.trim_end()));
    }

    Ok(Outcome::Applied(COMMIT_SUCCESSFUL.to_string()))
}
