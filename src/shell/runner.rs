//! Subprocess spawning behind a mockable trait.
//!
//! All git, gh and pre-commit invocations go through [`CommandRunner`], so workflows can be
//! exercised in tests without touching a real repository.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ShellError;

/// A fully described child process: program, argv, optional stdin text and extra env vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
            envs: Vec::new(),
        }
    }

    /// Feed `input` to the child's standard input.
    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Set an environment variable for the child only.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// The command line as a single display string.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Normalized outcome of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, skipping whichever is empty.
    pub fn combined_output(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Trait for executing external commands.
///
/// This abstraction allows mocking subprocesses in tests.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run the command to completion and capture its output.
    ///
    /// A non-zero exit is reported in the result, not as an error; only failing to start
    /// the process is an error.
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, ShellError>;

    /// Whether `program` can be found on PATH.
    fn is_installed(&self, program: &str) -> bool;
}

/// Run a command and return its stdout, treating a non-zero exit as [`ShellError::Failed`].
///
/// The output is returned untrimmed; trimming is the caller's business.
pub fn run_checked(runner: &dyn CommandRunner, spec: &CommandSpec) -> Result<String, ShellError> {
    let result = runner.execute(spec)?;
    if !result.success() {
        return Err(ShellError::Failed {
            command: spec.display(),
            code: result.exit_code,
            output: result.combined_output(),
        });
    }
    Ok(result.stdout)
}

/// Runner that spawns real processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, ShellError> {
        debug!("Running: {}", spec.display());

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Without explicit stdin the child reads ours, so line prompts still get answers.
        // Output is always captured for rewriting, which means pagers, colour and editors
        // launched by `rebase -i` see a pipe rather than a terminal.
        command.stdin(if spec.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        let mut child = command.spawn().map_err(|e| spawn_error(&spec.program, e))?;

        // The pipe drops at the end of the match, closing the child's stdin.
        let written = match (&spec.stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => pipe.write_all(input.as_bytes()),
            _ => Ok(()),
        };

        // Always reap the child, even when writing its input failed.
        let output = child
            .wait_with_output()
            .map_err(|e| spawn_error(&spec.program, e))?;

        // A child that exits without reading its input reports through its exit status.
        if let Err(source) = written
            && source.kind() != ErrorKind::BrokenPipe
        {
            return Err(ShellError::StdinFailed {
                program: spec.program.clone(),
                source,
            });
        }

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

fn spawn_error(program: &str, source: std::io::Error) -> ShellError {
    if source.kind() == ErrorKind::NotFound {
        ShellError::NotFound {
            program: program.to_string(),
        }
    } else {
        ShellError::SpawnFailed {
            program: program.to_string(),
            source,
        }
    }
}
