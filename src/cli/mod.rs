//! Command-line surface: native command parsing, routing and git passthrough.

pub mod args;
pub mod passthrough;
pub mod route;

pub use args::{Cli, Command};
pub use passthrough::{PassthroughOutput, clamp_exit_code, run_passthrough};
pub use route::{Route, classify, rewrite_branch_args, rewrite_output};
