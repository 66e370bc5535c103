//! Read-only commands that show git output alongside generated commentary.

use crate::cli::rewrite_output;
use crate::error::WorkflowError;
use crate::llm::ArtifactKind;

use super::{Context, Outcome};

pub const NOTHING_TO_REVIEW: &str = "⚠️ No staged changes found to review.";

/// `gai log`: the last ten commits and a bullet summary of them.
pub async fn run_log(ctx: &Context<'_>, extra: &[String]) -> Result<Outcome, WorkflowError> {
    let log = ctx.git().recent_log(extra)?;
    let summary = ctx.generate(ArtifactKind::LogSummary, &log).await?;

    Ok(Outcome::Shown(format!(
        "\nRecent commits:\n\n{}\n\n▶ Summary:\n\n{}",
        rewrite_output(log.trim_end()),
        summary.text
    )))
}

/// `gai blame <file> <line>`: the blame line and why it changed.
pub async fn run_blame(
    ctx: &Context<'_>,
    file: &str,
    line: &str,
    extra: &[String],
) -> Result<Outcome, WorkflowError> {
    let blame = ctx.git().line_blame(file, line, extra)?;
    let explanation = ctx.generate(ArtifactKind::BlameExplanation, &blame).await?;

    Ok(Outcome::Shown(format!(
        "\nBlame output:\n\n{}\n\n▶ Explanation:\n\n{}",
        rewrite_output(blame.trim_end()),
        explanation.text
    )))
}

/// `gai review`: feedback on the staged diff.
pub async fn run_review(ctx: &Context<'_>, extra: &[String]) -> Result<Outcome, WorkflowError> {
    let diff = ctx.git().staged_diff(extra)?;
    if diff.trim().is_empty() {
        return Ok(Outcome::NoOp(NOTHING_TO_REVIEW.to_string()));
    }

    let review = ctx.generate(ArtifactKind::CodeReview, &diff).await?;
    Ok(Outcome::Shown(format!("\n▶ Code Review:\n\n{}", review.text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use crate::llm::router::MockTextGenerator;
    use crate::shell::MockCommandRunner;
    use crate::workflow::confirm::MockConfirmer;
    use crate::workflow::test_support::{argv, context, failed, ok};

    #[tokio::test]
    async fn test_log_shows_rewritten_log_and_summary() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_execute()
            .withf(|spec| spec.args == ["log", "-n", "10", "--oneline", "--merges"])
            .times(1)
            .returning(|_| ok("abc123 Merge git history\n"));
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt, budget| {
                prompt.contains("<log>\nabc123 Merge git history\n") && *budget == 150
            })
            .returning(|_, _| Ok("- 🔀 Merged history".to_string()));
        let confirmer = MockConfirmer::new();

        let ctx = context(&runner, Some(&generator), &confirmer);
        let Outcome::Shown(text) = run_log(&ctx, &argv(&["--merges"])).await.unwrap() else {
            panic!("expected shown text");
        };
        assert!(text.contains("abc123 Merge gai history"));
        assert!(text.ends_with("▶ Summary:\n\n- 🔀 Merged history"));
    }

    #[tokio::test]
    async fn test_blame_prompt_uses_raw_output() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_execute()
            .withf(|spec| spec.args == ["blame", "-L", "7,7", "src/lib.rs"])
            .returning(|_| ok("^1a2b3c (Dev 2024-01-01 7) pub mod git;\n"));
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt, budget| prompt.contains("pub mod git;") && *budget == 100)
            .returning(|_, _| Ok("📦 Added the module.".to_string()));
        let confirmer = MockConfirmer::new();

        let ctx = context(&runner, Some(&generator), &confirmer);
        let Outcome::Shown(text) = run_blame(&ctx, "src/lib.rs", "7", &[]).await.unwrap() else {
            panic!("expected shown text");
        };
        assert!(text.contains("pub mod gai;"));
        assert!(text.contains("▶ Explanation:\n\n📦 Added the module."));
    }

    #[tokio::test]
    async fn test_blame_failure_is_fatal() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_execute()
            .returning(|_| failed(128, "fatal: file has only 3 lines\n"));
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();
        let confirmer = MockConfirmer::new();

        let ctx = context(&runner, Some(&generator), &confirmer);
        let err = run_blame(&ctx, "a.txt", "9", &[]).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Shell(ShellError::Failed { code: 128, .. })));
    }

    #[tokio::test]
    async fn test_review_of_empty_diff_is_noop() {
        let mut runner = MockCommandRunner::new();
        runner.expect_execute().returning(|_| ok("\n"));
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();
        let confirmer = MockConfirmer::new();

        let ctx = context(&runner, Some(&generator), &confirmer);
        assert_eq!(
            run_review(&ctx, &[]).await.unwrap(),
            Outcome::NoOp(NOTHING_TO_REVIEW.to_string())
        );
    }

    #[tokio::test]
    async fn test_review_uses_large_budget() {
        let mut runner = MockCommandRunner::new();
        runner.expect_execute().returning(|_| ok("+unsafe {}\n"));
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt, budget| prompt.contains("Review the following") && *budget == 1000)
            .returning(|_, _| Ok("⚠️ Avoid unsafe.".to_string()));
        let confirmer = MockConfirmer::new();

        let ctx = context(&runner, Some(&generator), &confirmer);
        assert_eq!(
            run_review(&ctx, &[]).await.unwrap(),
            Outcome::Shown("\n▶ Code Review:\n\n⚠️ Avoid unsafe.".to_string())
        );
    }
}
