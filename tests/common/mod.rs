//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use async_trait::async_trait;

use gai::error::{ProviderError, ShellError, WorkflowError};
use gai::shell::{CommandResult, CommandRunner, CommandSpec};
use gai::workflow::{Confirmer, Context, is_affirmative};
use gai::TextGenerator;

/// Build an owned argv from string literals.
pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| (*s).to_string()).collect()
}

pub fn output(exit_code: i32, stdout: &str, stderr: &str) -> CommandResult {
    CommandResult {
        exit_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

/// A runner that answers from a script and records every command it was asked to run.
///
/// Rules match on program plus an argv prefix; the first matching rule wins. Commands
/// with no matching rule succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    rules: Vec<(String, Vec<String>, CommandResult)>,
    installed: Vec<String>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, program: &str, args_prefix: &[&str], result: CommandResult) -> Self {
        self.rules
            .push((program.to_string(), argv(args_prefix), result));
        self
    }

    pub fn on_git(self, args_prefix: &[&str], stdout: &str) -> Self {
        self.on("git", args_prefix, output(0, stdout, ""))
    }

    pub fn with_installed(mut self, program: &str) -> Self {
        self.installed.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Recorded calls whose argv starts with `args_prefix`.
    pub fn calls_to(&self, program: &str, args_prefix: &[&str]) -> Vec<CommandSpec> {
        self.calls()
            .into_iter()
            .filter(|spec| spec.program == program && spec.args.starts_with(&argv(args_prefix)))
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, ShellError> {
        self.calls.borrow_mut().push(spec.clone());
        let result = self
            .rules
            .iter()
            .find(|(program, prefix, _)| *program == spec.program && spec.args.starts_with(prefix))
            .map(|(_, _, result)| result.clone())
            .unwrap_or_default();
        Ok(result)
    }

    fn is_installed(&self, program: &str) -> bool {
        self.installed.iter().any(|p| p == program)
    }
}

/// A generator that always answers with the same text and remembers what it was asked.
pub struct StaticGenerator {
    response: String,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl StaticGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push((prompt.to_string(), max_tokens));
        Ok(self.response.clone())
    }
}

/// Answers confirmation prompts from a queue of typed lines.
#[derive(Default)]
pub struct ScriptedConfirmer {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| (*a).to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, WorkflowError> {
        self.asked.borrow_mut().push(prompt.to_string());
        let answer = self.answers.borrow_mut().pop_front().ok_or_else(|| {
            WorkflowError::ConfirmationFailed("no scripted answer left".to_string())
        })?;
        Ok(is_affirmative(&answer))
    }
}

/// A context over the given fakes, as if running on a terminal.
pub fn context<'a>(
    runner: &'a FakeRunner,
    generator: Option<&'a StaticGenerator>,
    confirmer: &'a ScriptedConfirmer,
) -> Context<'a> {
    Context {
        runner,
        generator: generator.map(|g| g as &dyn TextGenerator),
        confirmer,
        stdin_is_terminal: true,
    }
}

/// A throwaway git repository driven through the real `git` executable.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a new repository with a committer identity configured.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "-q", "-b", "main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository, panicking on failure, and return stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let out = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            out.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8_lossy(&out.stdout).to_string()
    }

    /// Write `content` to `name` and stage it.
    pub fn stage(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
        self.git(&["add", name]);
    }
}

/// Restores the working directory when dropped.
pub struct DirGuard {
    original: PathBuf,
}

impl DirGuard {
    pub fn enter(dir: &Path) -> Self {
        let original = std::env::current_dir().expect("Failed to get current dir");
        std::env::set_current_dir(dir).expect("Failed to change dir");
        Self { original }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}
