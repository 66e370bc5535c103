//! Markdown code-fence removal for model responses.

const FENCE: &str = "```";

/// Trim a response and, if the whole thing is one fenced block, return its interior.
///
/// A language tag directly after the opening fence (` ```json `) is dropped along with
/// the fence. Unfenced text comes back trimmed and otherwise unchanged.
pub fn strip_fence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() < FENCE.len() * 2 || !trimmed.starts_with(FENCE) || !trimmed.ends_with(FENCE) {
        return trimmed.to_string();
    }

    let inner = &trimmed[FENCE.len()..trimmed.len() - FENCE.len()];
    let body = match inner.split_once('\n') {
        Some((first_line, rest)) if is_language_tag(first_line) => rest,
        _ => inner,
    };

    body.trim().to_string()
}

fn is_language_tag(line: &str) -> bool {
    let line = line.trim_end();
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}
