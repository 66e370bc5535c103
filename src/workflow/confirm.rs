//! The confirm-or-auto step shared by commit, stash and submit.

use dialoguer::Input;

use crate::error::WorkflowError;

/// Answers that count as "yes" once trimmed and lowercased.
const AFFIRMATIVE: [&str; 2] = ["y", "yes"];

/// Whether a typed answer accepts the suggestion.
///
/// Just pressing enter takes the `[Y/n]` default. Anything typed must be a yes token;
/// a line of only spaces is typed input, and declines.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim_end_matches(['\r', '\n']);
    answer.is_empty() || AFFIRMATIVE.contains(&answer.trim().to_lowercase().as_str())
}

/// How the apply step gets its go-ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// Apply without asking: the text came from the user, or `--yes` was given.
    Auto,
    /// Ask on the terminal.
    Interactive,
}

impl ConfirmPolicy {
    /// Decide up front, so a non-interactive session fails before any work is done
    /// instead of blocking on (or misreading) stdin later.
    pub fn resolve(
        command: &str,
        user_provided: bool,
        yes: bool,
        stdin_is_terminal: bool,
    ) -> Result<Self, WorkflowError> {
        if user_provided || yes {
            Ok(ConfirmPolicy::Auto)
        } else if stdin_is_terminal {
            Ok(ConfirmPolicy::Interactive)
        } else {
            Err(WorkflowError::ConfirmationUnavailable {
                command: command.to_string(),
            })
        }
    }
}

/// Source of yes/no answers.
///
/// This abstraction allows scripting answers in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer {
    /// Ask `prompt` and report whether the answer was affirmative.
    fn confirm(&self, prompt: &str) -> Result<bool, WorkflowError>;
}

/// Reads one line from the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, WorkflowError> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| WorkflowError::ConfirmationFailed(e.to_string()))?;
        Ok(is_affirmative(&answer))
    }
}
