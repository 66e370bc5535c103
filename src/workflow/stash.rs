//! `gai stash`: label from the unstaged diff, confirm, `git stash push -m`.

use tracing::debug;

use crate::error::WorkflowError;
use crate::llm::ArtifactKind;

use super::{Artifact, ConfirmPolicy, Context, Outcome, check_applied};

pub const NO_CHANGES: &str = "⚠️ No changes to stash.";
pub const STASHED: &str = "✅ Stashed successfully.";
const CONFIRM_PROMPT: &str = "Use this stash message? [Y/n]";

#[derive(Debug, Clone, Copy, Default)]
pub struct StashRequest<'a> {
    pub yes: bool,
    pub message: Option<&'a str>,
    pub extra: &'a [String],
}

pub async fn run_stash(
    ctx: &Context<'_>,
    request: StashRequest<'_>,
) -> Result<Outcome, WorkflowError> {
    let policy = ConfirmPolicy::resolve(
        "stash",
        request.message.is_some(),
        request.yes,
        ctx.stdin_is_terminal,
    )?;
    let git = ctx.git();

    let artifact = match request.message {
        Some(message) => Artifact::user_provided(ArtifactKind::StashName, message),
        None => {
            let diff = git.unstaged_diff(request.extra)?;
            if diff.trim().is_empty() {
                return Ok(Outcome::NoOp(NO_CHANGES.to_string()));
            }
            let artifact = ctx.generate(ArtifactKind::StashName, &diff).await?;
            println!("\nSuggested stash message:\n");
            println!("{}\n", artifact.text);
            artifact
        }
    };

    if !ctx.approve(policy, CONFIRM_PROMPT)? {
        debug!("Stash message declined");
        return Ok(Outcome::Declined);
    }

    check_applied("Stash", git.stash_push(&artifact.text, request.extra)?)?;
    Ok(Outcome::Applied(STASHED.to_string()))
}
