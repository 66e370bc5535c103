//! Invocation classification and the two rewrites applied to passthrough commands.

use crate::config::{TOOL_NAME, WRAPPER_NAME};

/// Subcommands gai handles itself.
pub const NATIVE_COMMANDS: [&str; 8] = [
    "commit", "stash", "log", "blame", "config", "test", "review", "submit",
];

/// Flags that belong to gai's own parser even though they are not subcommands.
const PARSER_FLAGS: [&str; 4] = ["-h", "--help", "-v", "--version"];

/// Where an invocation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A native command, handled by a workflow.
    Native,
    /// Anything else, forwarded to git.
    Passthrough,
    /// Help, version or no arguments at all: clap decides what to print.
    Parser,
}

/// Classify the arguments following the program name.
pub fn classify(args: &[String]) -> Route {
    let Some(first) = args.first() else {
        return Route::Parser;
    };

    if NATIVE_COMMANDS.contains(&first.as_str()) {
        Route::Native
    } else if PARSER_FLAGS.contains(&first.as_str()) {
        Route::Parser
    } else {
        Route::Passthrough
    }
}

/// Apply the branch prefix to `checkout -b <name>` and `branch <name>`.
///
/// Arguments are returned unchanged when the prefix is empty, when the branch name is
/// missing, or for `branch` invocations that start with an option (`branch -d x`).
pub fn rewrite_branch_args(args: &[String], prefix: &str) -> Vec<String> {
    let mut rewritten = args.to_vec();
    if prefix.is_empty() {
        return rewritten;
    }

    let target = match rewritten.first().map(String::as_str) {
        Some("checkout") if rewritten.get(1).map(String::as_str) == Some("-b") => 2,
        Some("branch") => 1,
        _ => return rewritten,
    };

    if let Some(name) = rewritten.get_mut(target)
        && !name.starts_with('-')
    {
        *name = format!("{prefix}/{name}");
    }

    rewritten
}

/// Replace git's name with gai's in text destined for the user.
///
/// Plain substring substitution, lowercase and capitalized forms alike.
pub fn rewrite_output(text: &str) -> String {
    let capitalized = capitalize(TOOL_NAME);
    text.replace(TOOL_NAME, WRAPPER_NAME)
        .replace(&capitalized, WRAPPER_NAME)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
