//! JSON extraction for structured model responses (the PR title/body summary).
//!
//! Models often wrap JSON in a markdown fence or surround it with chatter. Extraction
//! strips the fence first, then falls back to locating the first balanced, valid object.

use serde::Deserialize;

use super::fence::strip_fence;

/// Pull request title and body as produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrSummary {
    pub title: String,
    pub body: String,
}

/// Parse a `{"title": …, "body": …}` response, fenced or not.
pub fn parse_pr_summary(response: &str) -> Result<PrSummary, serde_json::Error> {
    serde_json::from_str(&extract_json(response))
}

/// Extract a JSON object from a response that may be fenced or surrounded by text.
///
/// Returns the (trimmed, unfenced) input unchanged when no valid object is found, so the
/// caller's parse error describes what the model actually said.
pub fn extract_json(response: &str) -> String {
    let unfenced = strip_fence(response);

    if serde_json::from_str::<serde_json::Value>(&unfenced).is_ok() {
        return unfenced;
    }

    find_valid_json_object(&unfenced).unwrap_or(unfenced)
}

/// Find the first valid JSON object by trying every `{` as a start position.
fn find_valid_json_object(text: &str) -> Option<String> {
    text.match_indices('{')
        .filter_map(|(start, _)| extract_balanced_braces(&text[start..]))
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
}

/// Extract a prefix with balanced braces, ignoring braces inside string literals.
fn extract_balanced_braces(text: &str) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (idx, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(text[..=idx].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_summary() {
        let summary = parse_pr_summary(r#"{"title": "✨ Add submit", "body": "Adds PRs."}"#).unwrap();
        assert_eq!(summary.title, "✨ Add submit");
        assert_eq!(summary.body, "Adds PRs.");
    }

    #[test]
    fn test_parse_fenced_summary() {
        let summary = parse_pr_summary("```json\n{\"title\":\"T\",\"body\":\"B\"}\n```").unwrap();
        assert_eq!(
            summary,
            PrSummary {
                title: "T".to_string(),
                body: "B".to_string()
            }
        );
    }

    #[test]
    fn test_parse_summary_with_chatter() {
        let response = "Sure! Here it is: {\"title\": \"T {x}\", \"body\": \"B\"} Let me know.";
        let summary = parse_pr_summary(response).unwrap();
        assert_eq!(summary.title, "T {x}");
    }

    #[test]
    fn test_missing_keys_is_an_error() {
        assert!(parse_pr_summary(r#"{"bad":"json"}"#).is_err());
    }

    #[test]
    fn test_non_json_is_an_error() {
        assert!(parse_pr_summary("I could not summarize this diff.").is_err());
    }

    #[test]
    fn test_extract_balanced_braces_with_strings() {
        let text = r#"{"msg": "use { and } carefully"} after"#;
        assert_eq!(
            extract_balanced_braces(text).unwrap(),
            r#"{"msg": "use { and } carefully"}"#
        );
    }

    #[test]
    fn test_extract_only_closing_braces() {
        assert_eq!(extract_json("}}"), "}}");
    }
}
