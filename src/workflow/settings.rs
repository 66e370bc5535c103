//! `gai config`: manage the branch prefix stored in git's config.

use crate::error::WorkflowError;

use super::{Context, Outcome};

pub async fn run_config(
    ctx: &Context<'_>,
    branch_prefix: Option<&str>,
) -> Result<Outcome, WorkflowError> {
    let git = ctx.git();

    match branch_prefix {
        Some("") => {
            git.unset_branch_prefix()?;
            Ok(Outcome::Applied("✅ Branch prefix unset.".to_string()))
        }
        Some(prefix) => {
            git.set_branch_prefix(prefix)?;
            Ok(Outcome::Applied(format!("✅ Branch prefix set to: {prefix}")))
        }
        None => {
            let current = git.branch_prefix();
            if current.is_empty() {
                Ok(Outcome::Shown("No branch prefix configured.".to_string()))
            } else {
                Ok(Outcome::Shown(format!("Branch prefix: {current}")))
            }
        }
    }
}
