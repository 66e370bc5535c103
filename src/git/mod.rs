//! Git queries and mutations, run through the `git` executable.

pub mod gateway;

pub use gateway::{DEFAULT_BRANCH_FALLBACK, GitGateway};
