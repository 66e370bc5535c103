//! Argv construction for the handful of git operations gai needs.
//!
//! Extra arguments are appended verbatim: gai never restricts git's own flag surface.
//! Read queries fail on a non-zero exit; the optional-feature queries (branch prefix,
//! default branch) recover to a safe default instead.

use tracing::debug;

use crate::config::{BRANCH_PREFIX_KEY, TOOL_NAME};
use crate::error::ShellError;
use crate::shell::runner::run_checked;
use crate::shell::{CommandResult, CommandRunner, CommandSpec};

/// Branch assumed when `origin/HEAD` cannot be resolved.
pub const DEFAULT_BRANCH_FALLBACK: &str = "main";

/// Remote whose default branch `submit` targets.
const UPSTREAM_REMOTE: &str = "origin";

/// `git config --unset` exits with 5 when the key is already absent.
const CONFIG_KEY_ABSENT: i32 = 5;

fn with_extra(mut args: Vec<String>, extra: &[String]) -> Vec<String> {
    args.extend(extra.iter().cloned());
    args
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| (*s).to_string()).collect()
}

pub fn staged_diff_args(extra: &[String]) -> Vec<String> {
    with_extra(strings(&["diff", "--cached"]), extra)
}

pub fn unstaged_diff_args(extra: &[String]) -> Vec<String> {
    with_extra(strings(&["diff"]), extra)
}

pub fn recent_log_args(extra: &[String]) -> Vec<String> {
    with_extra(strings(&["log", "-n", "10", "--oneline"]), extra)
}

pub fn line_blame_args(path: &str, line: &str, extra: &[String]) -> Vec<String> {
    let range = format!("{line},{line}");
    with_extra(strings(&["blame", "-L", &range, path]), extra)
}

/// `git commit [--date D] -F - [extra…]`; the message itself goes on stdin.
pub fn commit_args(date: Option<&str>, extra: &[String]) -> Vec<String> {
    let mut args = strings(&["commit"]);
    if let Some(date) = date {
        args.extend(strings(&["--date", date]));
    }
    args.extend(strings(&["-F", "-"]));
    with_extra(args, extra)
}

pub fn stash_push_args(label: &str, extra: &[String]) -> Vec<String> {
    with_extra(strings(&["stash", "push", "-m", label]), extra)
}

/// Extract the branch name from `refs/remotes/origin/<name>` output.
pub fn parse_default_branch(symbolic_ref: &str) -> Option<String> {
    let name = symbolic_ref.rsplit('/').next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Gateway to the git executable.
#[derive(Clone, Copy)]
pub struct GitGateway<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> GitGateway<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn spec(args: Vec<String>) -> CommandSpec {
        CommandSpec::new(TOOL_NAME, args)
    }

    fn read(&self, args: Vec<String>) -> Result<String, ShellError> {
        run_checked(self.runner, &Self::spec(args))
    }

    /// `git diff --cached [extra…]`
    pub fn staged_diff(&self, extra: &[String]) -> Result<String, ShellError> {
        self.read(staged_diff_args(extra))
    }

    /// `git diff [extra…]`
    pub fn unstaged_diff(&self, extra: &[String]) -> Result<String, ShellError> {
        self.read(unstaged_diff_args(extra))
    }

    /// `git log -n 10 --oneline [extra…]`
    pub fn recent_log(&self, extra: &[String]) -> Result<String, ShellError> {
        self.read(recent_log_args(extra))
    }

    /// `git blame -L <line>,<line> <path> [extra…]`
    pub fn line_blame(&self, path: &str, line: &str, extra: &[String]) -> Result<String, ShellError> {
        self.read(line_blame_args(path, line, extra))
    }

    /// The configured branch prefix, or an empty string when none is set.
    pub fn branch_prefix(&self) -> String {
        match self.read(strings(&["config", BRANCH_PREFIX_KEY])) {
            Ok(value) => value.trim().to_string(),
            Err(e) => {
                debug!("No branch prefix configured ({})", e);
                String::new()
            }
        }
    }

    pub fn set_branch_prefix(&self, prefix: &str) -> Result<(), ShellError> {
        self.read(strings(&["config", BRANCH_PREFIX_KEY, prefix]))
            .map(|_| ())
    }

    /// Remove the branch prefix; succeeds when it was never set.
    pub fn unset_branch_prefix(&self) -> Result<(), ShellError> {
        match self.read(strings(&["config", "--unset", BRANCH_PREFIX_KEY])) {
            Ok(_) => Ok(()),
            Err(e) if e.exit_code() == Some(CONFIG_KEY_ABSENT) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// The remote's default branch, falling back to `main`.
    pub fn default_branch(&self) -> String {
        let resolved = self
            .read(strings(&["symbolic-ref", "refs/remotes/origin/HEAD"]))
            .ok()
            .and_then(|out| parse_default_branch(&out));

        resolved.unwrap_or_else(|| {
            debug!(
                "origin/HEAD not resolvable, assuming '{}'",
                DEFAULT_BRANCH_FALLBACK
            );
            DEFAULT_BRANCH_FALLBACK.to_string()
        })
    }

    /// Diff of everything on HEAD since it forked from the remote default branch.
    pub fn diff_against_default_branch(&self) -> Result<String, ShellError> {
        let upstream = format!("{}/{}", UPSTREAM_REMOTE, self.default_branch());
        let base = self.read(strings(&["merge-base", "HEAD", &upstream]))?;
        let range = format!("{}..HEAD", base.trim());
        self.read(strings(&["diff", &range]))
    }

    /// Root of the working tree, if we are inside one.
    pub fn top_level(&self) -> Option<String> {
        match self.read(strings(&["rev-parse", "--show-toplevel"])) {
            Ok(path) if !path.trim().is_empty() => Some(path.trim().to_string()),
            _ => None,
        }
    }

    /// Where the pre-commit hook script lives for this repository.
    pub fn hook_path(&self, hook: &str) -> String {
        let fallback = format!(".git/hooks/{hook}");
        match self.read(strings(&["rev-parse", "--git-path", &format!("hooks/{hook}")])) {
            Ok(path) if !path.trim().is_empty() => path.trim().to_string(),
            _ => fallback,
        }
    }

    /// Create a commit with `message` fed on stdin; the outcome is returned, not judged.
    pub fn commit(
        &self,
        message: &str,
        date: Option<&str>,
        extra: &[String],
    ) -> Result<CommandResult, ShellError> {
        let mut spec = Self::spec(commit_args(date, extra)).with_stdin(message);
        if let Some(date) = date {
            spec = spec
                .with_env("GIT_AUTHOR_DATE", date)
                .with_env("GIT_COMMITTER_DATE", date);
        }
        self.runner.execute(&spec)
    }

    /// `git stash push -m <label> [extra…]`; the outcome is returned, not judged.
    pub fn stash_push(&self, label: &str, extra: &[String]) -> Result<CommandResult, ShellError> {
        self.runner.execute(&Self::spec(stash_push_args(label, extra)))
    }

    /// Forward `args` to git untouched and capture the outcome.
    pub fn passthrough(&self, args: &[String]) -> Result<CommandResult, ShellError> {
        self.runner.execute(&Self::spec(args.to_vec()))
    }
}
