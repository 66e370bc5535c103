//! gai - an AI-enhanced git wrapper.
//!
//! # Overview
//!
//! gai intercepts a handful of subcommands (`commit`, `stash`, `log`, `blame`, `review`,
//! `submit`, `config`, `test`) to add model-generated text and a confirmation step, and
//! forwards everything else to git, rewriting branch names with a configured prefix and
//! git's name in its output.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod shell;
pub mod workflow;

// Re-export commonly used types
pub use error::{ProviderError, ShellError, WorkflowError};
pub use llm::{Provider, ProviderHandle, TextGenerator};
pub use shell::{CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use workflow::{Context, Outcome};
