//! External command execution.

pub mod runner;

pub use runner::{CommandResult, CommandRunner, CommandSpec, SystemRunner};

#[cfg(test)]
pub use runner::MockCommandRunner;
