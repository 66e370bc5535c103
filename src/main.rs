//! gai - CLI entry point.

use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::CommandFactory;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gai::cli::{Cli, Command, Route, classify, run_passthrough};
use gai::config::{LOG_ENV_VAR, load_dotenv};
use gai::llm::{self, TextGenerator};
use gai::workflow::{
    CommitRequest, Context, Outcome, StashRequest, SubmitRequest, TerminalConfirmer, run_blame,
    run_commit, run_config, run_hooks, run_log, run_review, run_stash, run_submit,
};
use gai::{SystemRunner, WorkflowError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    load_dotenv();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so diagnostics never mix with forwarded git output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let runner = SystemRunner;

    let route = classify(&args);
    debug!("Routing {:?} as {:?}", args.first(), route);
    if route == Route::Passthrough {
        let output = run_passthrough(&runner, &args).context("Failed to run git")?;
        print!("{}", output.stdout);
        eprint!("{}", output.stderr);
        return Ok(ExitCode::from(output.exit_code));
    }

    // Help requests and usage errors exit inside the parser.
    let cli = Cli::parse_invocation(&args).unwrap_or_else(|e| e.exit());
    if cli.version {
        println!("gai {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        Cli::command().print_help().context("Failed to print help")?;
        return Ok(ExitCode::FAILURE);
    };

    let handle = if command.needs_provider() {
        Some(llm::resolve()?)
    } else {
        None
    };
    match &handle {
        Some(handle) => debug!(
            "Running {} with {} ({})",
            command.name(),
            handle.provider(),
            handle.model()
        ),
        None => debug!("Running {}", command.name()),
    }

    let ctx = Context {
        runner: &runner,
        generator: handle.as_ref().map(|h| h as &dyn TextGenerator),
        confirmer: &TerminalConfirmer,
        stdin_is_terminal: io::stdin().is_terminal(),
    };

    match dispatch(&ctx, &command).await? {
        Outcome::Applied(message) | Outcome::NoOp(message) | Outcome::Shown(message) => {
            println!("{message}");
        }
        Outcome::Declined => {}
    }

    Ok(ExitCode::SUCCESS)
}

async fn dispatch(ctx: &Context<'_>, command: &Command) -> Result<Outcome, WorkflowError> {
    match command {
        Command::Commit {
            yes,
            message,
            date,
            extra,
        } => {
            let request = CommitRequest {
                yes: *yes,
                message: message.as_deref(),
                date: date.as_deref(),
                extra,
            };
            run_commit(ctx, request).await
        }
        Command::Stash {
            yes,
            message,
            extra,
        } => {
            let request = StashRequest {
                yes: *yes,
                message: message.as_deref(),
                extra,
            };
            run_stash(ctx, request).await
        }
        Command::Log { extra } => run_log(ctx, extra).await,
        Command::Blame { file, line, extra } => run_blame(ctx, file, line, extra).await,
        Command::Review { extra } => run_review(ctx, extra).await,
        Command::Submit { yes, extra } => {
            run_submit(ctx, SubmitRequest { yes: *yes, extra }).await
        }
        Command::Config { branch_prefix } => run_config(ctx, branch_prefix.as_deref()).await,
        Command::Test => run_hooks(ctx).await,
    }
}
