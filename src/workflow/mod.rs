//! Native command handlers.
//!
//! `commit`, `stash` and `submit` share one shape: acquire an artifact (user-supplied or
//! generated from a git payload), show it, confirm or auto-accept, apply, report.
//! `log`, `blame` and `review` only display generated text; `config` and `test` are thin
//! wrappers around git config and pre-commit.

pub mod commit;
pub mod confirm;
pub mod hooks;
pub mod insight;
pub mod settings;
pub mod stash;
pub mod submit;

pub use commit::{CommitRequest, run_commit};
pub use confirm::{ConfirmPolicy, Confirmer, TerminalConfirmer, is_affirmative};
pub use hooks::run_hooks;
pub use insight::{run_blame, run_log, run_review};
pub use settings::run_config;
pub use stash::{StashRequest, run_stash};
pub use submit::{SubmitRequest, run_submit};

use crate::cli::rewrite_output;
use crate::error::{ProviderError, WorkflowError};
use crate::git::GitGateway;
use crate::llm::{ArtifactKind, TextGenerator};
use crate::shell::{CommandResult, CommandRunner};

/// Everything a handler needs from the outside world.
pub struct Context<'a> {
    pub runner: &'a dyn CommandRunner,
    /// Absent when the invocation needs no model (e.g. `commit -m`).
    pub generator: Option<&'a dyn TextGenerator>,
    pub confirmer: &'a dyn Confirmer,
    pub stdin_is_terminal: bool,
}

impl<'a> Context<'a> {
    pub fn git(&self) -> GitGateway<'a> {
        GitGateway::new(self.runner)
    }

    fn generator(&self) -> Result<&'a dyn TextGenerator, WorkflowError> {
        self.generator
            .ok_or(WorkflowError::Provider(ProviderError::NoProviderAvailable))
    }

    /// Generate an artifact of `kind` from `payload`, trimmed.
    async fn generate(&self, kind: ArtifactKind, payload: &str) -> Result<Artifact, WorkflowError> {
        let text = self
            .generator()?
            .generate(&kind.build_prompt(payload), kind.max_tokens())
            .await?;
        Ok(Artifact::generated(kind, text.trim()))
    }

    /// Ask `prompt` unless the policy says to go ahead.
    fn approve(&self, policy: ConfirmPolicy, prompt: &str) -> Result<bool, WorkflowError> {
        match policy {
            ConfirmPolicy::Auto => Ok(true),
            ConfirmPolicy::Interactive => self.confirmer.confirm(prompt),
        }
    }
}

/// How a native command ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The artifact was applied; carries the success message.
    Applied(String),
    /// Nothing to act on; carries the notice to show.
    NoOp(String),
    /// The user declined. Nothing was applied and nothing more is printed.
    Declined,
    /// Text for the user (log summary, blame explanation, review, config value).
    Shown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSource {
    Generated,
    UserProvided,
}

/// A generated or user-supplied payload, consumed by the apply step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub text: String,
    pub source: ArtifactSource,
}

impl Artifact {
    pub fn generated(kind: ArtifactKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            source: ArtifactSource::Generated,
        }
    }

    pub fn user_provided(kind: ArtifactKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            source: ArtifactSource::UserProvided,
        }
    }
}

/// Turn a finished apply subprocess into the workflow's result.
fn check_applied(action: &str, result: CommandResult) -> Result<CommandResult, WorkflowError> {
    if result.success() {
        Ok(result)
    } else {
        Err(WorkflowError::ApplyFailed {
            action: action.to_string(),
            output: rewrite_output(&result.combined_output()),
        })
    }
}
