//! Names, environment variables and the small amount of process configuration gai reads.
//!
//! Nothing here is persisted by gai itself: API keys live in the environment (optionally
//! seeded from a `.env` file) and the branch prefix lives in git's own config store.

use std::env;

/// The name users invoke the wrapper as; substituted into forwarded git output.
pub const WRAPPER_NAME: &str = "gai";

/// The wrapped version-control executable.
pub const TOOL_NAME: &str = "git";

/// Git config key holding the branch prefix.
pub const BRANCH_PREFIX_KEY: &str = "gai.branch-prefix";

/// Environment variable overriding the model for whichever backend is active.
pub const MODEL_ENV_VAR: &str = "MODEL_NAME";

/// Environment variable controlling log verbosity (an `EnvFilter` directive).
pub const LOG_ENV_VAR: &str = "GAI_LOG";

/// Load a `.env` file from the working directory if one exists.
///
/// A missing file is the normal case; a malformed one is logged and ignored.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Read an environment variable, treating empty values as unset.
pub fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
