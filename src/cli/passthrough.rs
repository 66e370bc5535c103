//! Forwarding of non-native commands to git.

use tracing::debug;

use crate::error::ShellError;
use crate::git::GitGateway;
use crate::shell::CommandRunner;

use super::route::{rewrite_branch_args, rewrite_output};

/// What to emit and exit with after a forwarded git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: u8,
}

/// Forward `args` to git, applying the branch prefix and rewriting the output text.
///
/// A non-zero exit from git is a normal outcome and is reported, not raised. Only a
/// missing or unspawnable git executable is an error.
pub fn run_passthrough(
    runner: &dyn CommandRunner,
    args: &[String],
) -> Result<PassthroughOutput, ShellError> {
    let git = GitGateway::new(runner);

    let args = if creates_branch(args) {
        rewrite_branch_args(args, &git.branch_prefix())
    } else {
        args.to_vec()
    };

    let result = git.passthrough(&args)?;
    debug!("git exited with {}", result.exit_code);

    Ok(PassthroughOutput {
        stdout: rewrite_output(&result.stdout),
        stderr: rewrite_output(&result.stderr),
        exit_code: clamp_exit_code(result.exit_code),
    })
}

/// Only these invocations can be affected by the prefix, so only they pay for the lookup.
fn creates_branch(args: &[String]) -> bool {
    matches!(
        args.first().map(String::as_str),
        Some("checkout") | Some("branch")
    )
}

/// Map a child's exit status onto a process exit code; anything out of range becomes 1.
pub fn clamp_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
