//! Prompt construction, one template per artifact kind.
//!
//! Every prompt embeds its payload in a tagged block (`<diff>…</diff>` and friends) after
//! a short preamble fixing tone, length and the leading-emoji convention.

/// Payloads longer than this (in bytes) are cut before being embedded.
const MAX_PAYLOAD_LENGTH: usize = 30_000;

const PREAMBLE: &str = "You are an expert developer.";

/// The kinds of text gai asks a model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CommitMessage,
    StashName,
    LogSummary,
    BlameExplanation,
    CodeReview,
    PrSummary,
}

impl ArtifactKind {
    /// Token budget for one generation of this kind.
    pub fn max_tokens(&self) -> u32 {
        match self {
            ArtifactKind::CommitMessage | ArtifactKind::StashName => 60,
            ArtifactKind::LogSummary => 150,
            ArtifactKind::BlameExplanation => 100,
            ArtifactKind::CodeReview => 1000,
            ArtifactKind::PrSummary => 250,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            ArtifactKind::CommitMessage
            | ArtifactKind::StashName
            | ArtifactKind::CodeReview
            | ArtifactKind::PrSummary => "diff",
            ArtifactKind::LogSummary => "log",
            ArtifactKind::BlameExplanation => "blame",
        }
    }

    fn instructions(&self) -> &'static str {
        match self {
            ArtifactKind::CommitMessage => {
                "Write a concise, clear git commit message (imperative mood, ≤ 72 chars in the subject) \
                 for the following diff. Start the subject line with a single, relevant, positive emoji."
            }
            ArtifactKind::StashName => {
                "Write a concise, clear stash message (imperative mood, ≤ 72 chars in the subject) \
                 for the following diff. Start the subject line with a single, relevant, positive emoji."
            }
            ArtifactKind::LogSummary => {
                "Summarize the following git commit log into bullet points, using relevant, positive \
                 emojis. Focus on key changes and group related commits where sensible:"
            }
            ArtifactKind::BlameExplanation => {
                "Explain why this line was changed based on the git blame output and commit hash \
                 details. Start with a relevant, positive emoji and keep it under 120 words:"
            }
            ArtifactKind::CodeReview => {
                "Review the following code changes and provide feedback. Focus on identifying \
                 potential bugs, performance issues, and areas for improvement. Use a positive and \
                 constructive tone, with relevant emojis:"
            }
            ArtifactKind::PrSummary => {
                "Based on the following diff, generate a pull request title and a short summary body \
                 in JSON format. The JSON should have two keys: \"title\" and \"body\". The title \
                 should start with a relevant, positive emoji. Respond with only the JSON object."
            }
        }
    }

    /// Build the full prompt around `payload`.
    pub fn build_prompt(&self, payload: &str) -> String {
        let tag = self.tag();
        let (payload, truncated) = truncate(payload, MAX_PAYLOAD_LENGTH);
        let note = if truncated {
            "\n\nNote: the input was truncated due to size. Focus on the visible part."
        } else {
            ""
        };

        format!(
            "{PREAMBLE} {instructions}{note}\n\n<{tag}>\n{payload}\n</{tag}>",
            instructions = self.instructions(),
        )
    }
}

fn truncate(text: &str, max_len: usize) -> (&str, bool) {
    if text.len() <= max_len {
        return (text, false);
    }
    let mut end = max_len;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    (&text[..end], true)
}
