//! Error types for gai modules using thiserror.

use thiserror::Error;

use crate::llm::Provider;

/// Errors from spawning external commands.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Command not found: {program}. Is it in your PATH?")]
    NotFound { program: String },

    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write input to {program}: {source}")]
    StdinFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}\n{output}")]
    Failed {
        command: String,
        code: i32,
        output: String,
    },
}

impl ShellError {
    /// Exit code of the failed command, if it ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ShellError::Failed { code, .. } => Some(*code),
            ShellError::NotFound { .. }
            | ShellError::SpawnFailed { .. }
            | ShellError::StdinFailed { .. } => None,
        }
    }
}

/// Errors from the text-generation backends.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(
        "No API keys found in environment variables. Set one of GEMINI_API_KEY, GOOGLE_API_KEY, OPENAI_API_KEY or ANTHROPIC_API_KEY (a .env file in the current directory also works)."
    )]
    NoProviderAvailable,

    #[error("{provider} API key is not valid. Please check your environment or .env file.")]
    InvalidCredential { provider: Provider },

    #[error("{provider} API error: {message}")]
    Transport { provider: Provider, message: String },

    #[error("{provider} returned a response that could not be read: {detail}")]
    EmptyResponse { provider: Provider, detail: String },

    #[error("Failed to set up the {provider} HTTP client: {source}")]
    ClientSetup {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from the commit/stash/submit workflows and the thin handlers.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("The '{tool}' command-line tool is not installed. {hint}")]
    ToolMissing { tool: String, hint: String },

    #[error("No changes to submit.")]
    NothingToSubmit,

    #[error("Could not parse PR summary from the AI response: {reason}\n{raw}")]
    MalformedResponse { reason: String, raw: String },

    #[error(
        "'gai {command}' needs confirmation but stdin is not a terminal. Re-run with --yes to apply without prompting."
    )]
    ConfirmationUnavailable { command: String },

    #[error("Failed to read confirmation: {0}")]
    ConfirmationFailed(String),

    #[error("{action} failed.\n{output}")]
    ApplyFailed { action: String, output: String },

    #[error("Pre-commit hooks failed: {0}")]
    HookFailed(String),
}
