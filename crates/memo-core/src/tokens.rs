//! Word-count based token estimation and truncation.
//!
//! The estimate is a fixed ratio over whitespace-delimited words. It is only
//! used to keep prompts under the provider's input budget, never for billing.

use crate::defaults::{TOKENS_PER_WORD, TRUNCATION_MARKER};

/// Estimated token count: `ceil(words * 1.3)`, 0 for blank text.
pub fn estimate_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0;
    }
    (words as f64 * TOKENS_PER_WORD).ceil() as usize
}

/// Whether the estimate for `text` is over `max_tokens`.
pub fn exceeds_token_limit(text: &str, max_tokens: usize) -> bool {
    estimate_tokens(text) > max_tokens
}

/// Cut `text` down to roughly `max_tokens`.
///
/// Text within the limit comes back unchanged. Otherwise words are kept in
/// order while the running total of per-word estimates stays within the
/// limit. Each word is estimated on its own, so it costs 2 tokens. Kept words
/// are joined with single spaces and [`TRUNCATION_MARKER`] is appended when
/// the result is shorter than the input.
pub fn truncate_to_token_limit(text: &str, max_tokens: usize) -> String {
    if !exceeds_token_limit(text, max_tokens) {
        return text.to_string();
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut used = 0usize;
    for word in text.split_whitespace() {
        let cost = estimate_tokens(word);
        if used + cost > max_tokens {
            break;
        }
        kept.push(word);
        used += cost;
    }

    let mut truncated = kept.join(" ");
    if truncated.len() < text.len() {
        truncated.push_str(TRUNCATION_MARKER);
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_empty() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   \n\t "), 0);
    }

    #[test]
    fn test_estimate_hello_world() {
        let count = estimate_tokens("Hello world");
        assert!(count > 0);
        assert!(count <= 20);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_estimate_rounds_up() {
        assert_eq!(estimate_tokens("one"), 2);
        assert_eq!(estimate_tokens("a b c d e f g h i j"), 13);
    }

    #[test]
    fn test_estimate_ignores_repeated_whitespace() {
        assert_eq!(estimate_tokens("  a   b\n\nc  "), estimate_tokens("a b c"));
    }

    #[test]
    fn test_exceeds_token_limit() {
        assert!(!exceeds_token_limit("a b c", 4));
        assert!(exceeds_token_limit("a b c", 3));
    }

    #[test]
    fn test_truncate_within_limit_is_unchanged() {
        let text = "short  text\nwith odd spacing";
        assert_eq!(truncate_to_token_limit(text, 8000), text);
    }

    #[test]
    fn test_truncate_shortens_and_marks() {
        let text = "word ".repeat(100);
        let truncated = truncate_to_token_limit(&text, 10);
        assert!(truncated.len() < text.len());
        assert!(truncated.ends_with("..."));
        // five words at two tokens each fit in a budget of ten
        assert_eq!(truncated, "word word word word word...");
    }

    #[test]
    fn test_truncate_long_text_to_default_budget() {
        let text = "lorem ".repeat(10_000);
        let truncated = truncate_to_token_limit(&text, 8000);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.trim_end_matches("...").split(' ').count(), 4000);
    }
}
