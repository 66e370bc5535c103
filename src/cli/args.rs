//! Argument declarations for the native commands.
//!
//! Only native invocations (and help/version requests) reach this parser; everything else
//! is forwarded to git before clap ever sees it. Within a native command, arguments gai
//! does not own are split off before parsing and land in the command's `extra` list.

use clap::{Parser, Subcommand};

use crate::config::WRAPPER_NAME;

/// AI-enhanced git wrapper.
#[derive(Parser, Debug)]
#[command(name = "gai")]
#[command(about = "AI-enhanced git wrapper")]
#[command(
    long_about = "AI-enhanced git wrapper.\n\nAny command not listed below is passed through to git unchanged."
)]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print version
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a commit message from staged changes
    Commit {
        /// Commit without confirmation
        #[arg(short, long)]
        yes: bool,

        /// Provide a commit message instead of generating one
        #[arg(short, long)]
        message: Option<String>,

        /// Override the date of the commit
        #[arg(long)]
        date: Option<String>,

        #[arg(skip)]
        extra: Vec<String>,
    },

    /// Generate a stash message from unstaged changes
    Stash {
        /// Stash without confirmation
        #[arg(short, long)]
        yes: bool,

        /// Provide a stash message instead of generating one
        #[arg(short, long)]
        message: Option<String>,

        #[arg(skip)]
        extra: Vec<String>,
    },

    /// Summarize the last 10 commits
    Log {
        #[arg(skip)]
        extra: Vec<String>,
    },

    /// Explain a line change
    Blame {
        /// Path to the file
        file: String,

        /// Line number
        line: String,

        #[arg(skip)]
        extra: Vec<String>,
    },

    /// Request a code review on staged changes
    Review {
        #[arg(skip)]
        extra: Vec<String>,
    },

    /// Open a pull request with an AI-written title and body
    Submit {
        /// Create the pull request without confirmation
        #[arg(short, long)]
        yes: bool,

        #[arg(skip)]
        extra: Vec<String>,
    },

    /// Set configuration for gai
    Config {
        /// Set a prefix for new branches created with `gai checkout -b` (empty to unset)
        #[arg(long)]
        branch_prefix: Option<String>,
    },

    /// Run pre-commit hooks on all files
    Test,
}

impl Cli {
    /// Parse the arguments following the program name.
    ///
    /// gai's own flags are recognised wherever they appear, so `commit --no-verify -m x`
    /// keeps its message and forwards only `--no-verify`.
    pub fn parse_invocation(args: &[String]) -> Result<Self, clap::Error> {
        let Some((subcommand, rest)) = args.split_first() else {
            return Self::try_parse_from([WRAPPER_NAME]);
        };

        let (owned, forwarded) = split_forwarded(subcommand, rest);
        let argv = [WRAPPER_NAME, subcommand.as_str()]
            .into_iter()
            .chain(owned.iter().map(String::as_str));
        let mut cli = Self::try_parse_from(argv)?;

        if let Some(extra) = cli.command.as_mut().and_then(Command::extra_mut) {
            *extra = forwarded;
        }
        Ok(cli)
    }
}

/// An option gai owns inside a native command.
#[derive(Debug, Clone, Copy)]
struct OwnedFlag {
    short: Option<char>,
    long: &'static str,
    takes_value: bool,
}

impl OwnedFlag {
    const fn new(short: Option<char>, long: &'static str, takes_value: bool) -> Self {
        Self {
            short,
            long,
            takes_value,
        }
    }

    /// Whether `token` is this flag, and whether its value is the next token.
    fn matches(&self, token: &str) -> Option<ValuePlacement> {
        if let Some(long) = token.strip_prefix("--") {
            if long == self.long {
                return Some(if self.takes_value {
                    ValuePlacement::NextToken
                } else {
                    ValuePlacement::Inline
                });
            }
            let attached = long
                .strip_prefix(self.long)
                .is_some_and(|rest| rest.starts_with('='));
            return (self.takes_value && attached).then_some(ValuePlacement::Inline);
        }

        let mut chars = token.strip_prefix('-')?.chars();
        if chars.next()? != self.short? {
            return None;
        }
        match (chars.as_str().is_empty(), self.takes_value) {
            (true, true) => Some(ValuePlacement::NextToken),
            (true, false) | (false, true) => Some(ValuePlacement::Inline),
            // A cluster such as `-yq` is git's business.
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValuePlacement {
    Inline,
    NextToken,
}

const HELP: OwnedFlag = OwnedFlag::new(Some('h'), "help", false);
const YES: OwnedFlag = OwnedFlag::new(Some('y'), "yes", false);
const MESSAGE: OwnedFlag = OwnedFlag::new(Some('m'), "message", true);
const DATE: OwnedFlag = OwnedFlag::new(None, "date", true);

const COMMIT_FLAGS: &[OwnedFlag] = &[YES, MESSAGE, DATE, HELP];
const STASH_FLAGS: &[OwnedFlag] = &[YES, MESSAGE, HELP];
const SUBMIT_FLAGS: &[OwnedFlag] = &[YES, HELP];
const HELP_ONLY: &[OwnedFlag] = &[HELP];

/// Flags and positional count owned by each subcommand that forwards extras.
fn owned_arguments(subcommand: &str) -> Option<(&'static [OwnedFlag], usize)> {
    match subcommand {
        "commit" => Some((COMMIT_FLAGS, 0)),
        "stash" => Some((STASH_FLAGS, 0)),
        "submit" => Some((SUBMIT_FLAGS, 0)),
        "log" | "review" => Some((HELP_ONLY, 0)),
        "blame" => Some((HELP_ONLY, 2)),
        _ => None,
    }
}

/// Separate the arguments gai parses from the ones it forwards.
///
/// Owned flags are picked out wherever they appear. A value given as the next token is
/// folded into `--long=value` so clap accepts values that start with `-`. Everything from
/// `--` onwards is forwarded. Subcommands without extras keep all their arguments.
pub fn split_forwarded(subcommand: &str, args: &[String]) -> (Vec<String>, Vec<String>) {
    let Some((flags, mut positionals)) = owned_arguments(subcommand) else {
        return (args.to_vec(), Vec::new());
    };

    let mut owned = Vec::new();
    let mut forwarded = Vec::new();
    let mut rest = args.iter();

    while let Some(arg) = rest.next() {
        if arg == "--" {
            forwarded.push(arg.clone());
            forwarded.extend(rest.by_ref().cloned());
            break;
        }

        match flags
            .iter()
            .find_map(|flag| flag.matches(arg).map(|placement| (flag, placement)))
        {
            Some((flag, ValuePlacement::NextToken)) => match rest.next() {
                Some(value) => owned.push(format!("--{}={}", flag.long, value)),
                None => owned.push(arg.clone()),
            },
            Some((_, ValuePlacement::Inline)) => owned.push(arg.clone()),
            None if positionals > 0 && !arg.starts_with('-') => {
                positionals -= 1;
                owned.push(arg.clone());
            }
            None => forwarded.push(arg.clone()),
        }
    }

    (owned, forwarded)
}

impl Command {
    fn extra_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Command::Commit { extra, .. }
            | Command::Stash { extra, .. }
            | Command::Log { extra }
            | Command::Blame { extra, .. }
            | Command::Review { extra }
            | Command::Submit { extra, .. } => Some(extra),
            Command::Config { .. } | Command::Test => None,
        }
    }

    /// The subcommand name as typed by the user.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Commit { .. } => "commit",
            Command::Stash { .. } => "stash",
            Command::Log { .. } => "log",
            Command::Blame { .. } => "blame",
            Command::Review { .. } => "review",
            Command::Submit { .. } => "submit",
            Command::Config { .. } => "config",
            Command::Test => "test",
        }
    }

    /// Whether this invocation will call a model, and so needs a provider at startup.
    pub fn needs_provider(&self) -> bool {
        match self {
            Command::Commit { message, .. } | Command::Stash { message, .. } => message.is_none(),
            Command::Log { .. } | Command::Blame { .. } | Command::Review { .. } => true,
            Command::Submit { .. } => true,
            Command::Config { .. } | Command::Test => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn parse(args: &[&str]) -> Command {
        Cli::parse_invocation(&argv(args))
            .unwrap()
            .command
            .expect("subcommand")
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_commit_flags() {
        assert_eq!(
            parse(&["commit", "-y", "-m", "fix bug", "--date", "2024-01-01"]),
            Command::Commit {
                yes: true,
                message: Some("fix bug".to_string()),
                date: Some("2024-01-01".to_string()),
                extra: vec![],
            }
        );
    }

    #[test]
    fn test_unknown_flags_become_extra_args() {
        assert_eq!(
            parse(&["commit", "--yes", "--no-verify", "--signoff"]),
            Command::Commit {
                yes: true,
                message: None,
                date: None,
                extra: vec!["--no-verify".to_string(), "--signoff".to_string()],
            }
        );
        assert_eq!(
            parse(&["log", "--author=me"]),
            Command::Log {
                extra: vec!["--author=me".to_string()]
            }
        );
    }

    #[test]
    fn test_owned_flags_after_forwarded_flags() {
        assert_eq!(
            parse(&["commit", "--no-verify", "-m", "fix bug"]),
            Command::Commit {
                yes: false,
                message: Some("fix bug".to_string()),
                date: None,
                extra: vec!["--no-verify".to_string()],
            }
        );
        assert_eq!(
            parse(&["stash", "--keep-index", "-y"]),
            Command::Stash {
                yes: true,
                message: None,
                extra: vec!["--keep-index".to_string()],
            }
        );
        assert_eq!(
            parse(&["submit", "--draft", "--yes", "--base", "dev"]),
            Command::Submit {
                yes: true,
                extra: argv(&["--draft", "--base", "dev"]),
            }
        );
    }

    #[test]
    fn test_message_forms() {
        let message = |args: &[&str]| match parse(args) {
            Command::Commit { message, .. } => message,
            other => panic!("Expected commit, got {other:?}"),
        };
        assert_eq!(message(&["commit", "-mfix"]), Some("fix".to_string()));
        assert_eq!(message(&["commit", "--message=fix"]), Some("fix".to_string()));
        assert_eq!(message(&["commit", "--message", "-x"]), Some("-x".to_string()));
    }

    #[test]
    fn test_date_after_forwarded_flag() {
        assert_eq!(
            parse(&["commit", "--signoff", "--date", "2024-01-01", "-y"]),
            Command::Commit {
                yes: true,
                message: None,
                date: Some("2024-01-01".to_string()),
                extra: vec!["--signoff".to_string()],
            }
        );
    }

    #[test]
    fn test_double_dash_forwards_the_rest() {
        let (owned, forwarded) = split_forwarded("commit", &argv(&["-y", "--", "-m", "x"]));
        assert_eq!(owned, argv(&["-y"]));
        assert_eq!(forwarded, argv(&["--", "-m", "x"]));
    }

    #[test]
    fn test_short_cluster_is_forwarded() {
        let (owned, forwarded) = split_forwarded("stash", &argv(&["-yq"]));
        assert!(owned.is_empty());
        assert_eq!(forwarded, argv(&["-yq"]));
    }

    #[test]
    fn test_blame_positionals_around_flags() {
        assert_eq!(
            parse(&["blame", "-w", "src/lib.rs", "12", "--porcelain"]),
            Command::Blame {
                file: "src/lib.rs".to_string(),
                line: "12".to_string(),
                extra: argv(&["-w", "--porcelain"]),
            }
        );
    }

    #[test]
    fn test_unknown_flag_for_config_is_rejected() {
        assert!(Cli::parse_invocation(&argv(&["config", "--bogus"])).is_err());
    }

    #[test]
    fn test_blame_positionals() {
        assert_eq!(
            parse(&["blame", "src/lib.rs", "12"]),
            Command::Blame {
                file: "src/lib.rs".to_string(),
                line: "12".to_string(),
                extra: vec![],
            }
        );
    }

    #[test]
    fn test_config_accepts_empty_prefix() {
        assert_eq!(
            parse(&["config", "--branch-prefix", ""]),
            Command::Config {
                branch_prefix: Some(String::new())
            }
        );
    }

    #[test]
    fn test_needs_provider() {
        assert!(parse(&["commit"]).needs_provider());
        assert!(!parse(&["commit", "-m", "x"]).needs_provider());
        assert!(!parse(&["stash", "-m", "x"]).needs_provider());
        assert!(parse(&["submit"]).needs_provider());
        assert!(parse(&["review"]).needs_provider());
        assert!(!parse(&["config"]).needs_provider());
        assert!(!parse(&["test"]).needs_provider());
    }

    #[test]
    fn test_version_flag_without_subcommand() {
        let cli = Cli::parse_invocation(&argv(&["-v"])).unwrap();
        assert!(cli.version);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_blame_requires_file_and_line() {
        assert!(Cli::parse_invocation(&argv(&["blame", "src/lib.rs"])).is_err());
    }
}
