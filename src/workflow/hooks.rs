//! `gai test`: make sure pre-commit hooks are installed, then run them on every file.
//! `gai commit` performs the same install step quietly before committing.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::shell::CommandSpec;

use super::{Context, Outcome};

pub const HOOK_RUNNER: &str = "pre-commit";
const HOOK_RUNNER_HINT: &str = "Install it with `pip install pre-commit`. See: https://pre-commit.com/";
pub const HOOKS_PASSED: &str = "✅ Pre-commit hooks passed.";
const HOOK_CONFIG: &str = ".pre-commit-config.yaml";

pub async fn run_hooks(ctx: &Context<'_>) -> Result<Outcome, WorkflowError> {
    if !ctx.runner.is_installed(HOOK_RUNNER) {
        return Err(WorkflowError::ToolMissing {
            tool: HOOK_RUNNER.to_string(),
            hint: HOOK_RUNNER_HINT.to_string(),
        });
    }

    install_hooks_if_needed(ctx);

    println!("▶ Running pre-commit hooks...");
    let result = ctx
        .runner
        .execute(&CommandSpec::new(HOOK_RUNNER, ["run", "--all-files"]))?;

    if !result.stdout.trim().is_empty() {
        println!("{}", result.stdout.trim_end());
    }
    // stdout is already on screen, so the error only adds what pre-commit said on stderr.
    if !result.success() {
        let stderr = result.stderr.trim();
        let detail = if stderr.is_empty() {
            format!("exit code {}", result.exit_code)
        } else {
            stderr.to_string()
        };
        return Err(WorkflowError::HookFailed(detail));
    }

    Ok(Outcome::Applied(HOOKS_PASSED.to_string()))
}

/// Install hooks ahead of a commit when pre-commit is available and the repository
/// configures it. Never fails: a missing tool or config just skips the step.
pub(crate) fn prepare_commit_hooks(ctx: &Context<'_>) {
    if !ctx.runner.is_installed(HOOK_RUNNER) {
        debug!("pre-commit not on PATH, skipping hook install");
        return;
    }
    let configured = ctx
        .git()
        .top_level()
        .is_some_and(|root| Path::new(&root).join(HOOK_CONFIG).exists());
    if !configured {
        debug!("No {} in the repository, skipping hook install", HOOK_CONFIG);
        return;
    }
    install_hooks_if_needed(ctx);
}

/// Best effort: any failure here is a warning, and the run still goes ahead.
fn install_hooks_if_needed(ctx: &Context<'_>) {
    let hook = ctx.git().hook_path(HOOK_RUNNER);
    if Path::new(&hook).exists() {
        return;
    }

    println!("▶ pre-commit hooks not found. Installing...");
    let outcome = ctx
        .runner
        .execute(&CommandSpec::new(HOOK_RUNNER, ["install"]));

    match outcome {
        Ok(result) if result.success() => println!("✅ pre-commit hooks installed successfully."),
        Ok(result) => warn_install_failed(&result.combined_output()),
        Err(e) => warn_install_failed(&e.to_string()),
    }
}

fn warn_install_failed(reason: &str) {
    warn!("pre-commit install failed: {}", reason);
    eprintln!("⚠️ Could not install pre-commit hooks: {reason}");
}
