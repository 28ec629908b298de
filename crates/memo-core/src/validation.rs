//! Input validation for note titles and content.
//!
//! Checks run before anything is persisted. Emptiness is tested before
//! length, so whitespace-only input always reports the "required" message.
//! Lengths count characters of the raw input, not bytes.

use crate::defaults::{CONTENT_MAX, TITLE_MAX_CREATE, TITLE_MAX_UPDATE};
use crate::error::{Error, Result};

/// Which title maximum applies.
///
/// Creation and update accept different maxima; both are enforced as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleLimit {
    Create,
    Update,
}

impl TitleLimit {
    pub fn max_chars(self) -> usize {
        match self {
            TitleLimit::Create => TITLE_MAX_CREATE,
            TitleLimit::Update => TITLE_MAX_UPDATE,
        }
    }
}

/// Validate a title/content pair.
pub fn validate_note(title: &str, content: &str, limit: TitleLimit) -> Result<()> {
    validate_title(title, limit)?;
    validate_content(content)
}

/// Validate content for the content-only update path.
///
/// Only emptiness is checked here; the length maximum is not applied.
pub fn validate_content_only(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::validation("content", "Content is required."));
    }
    Ok(())
}

fn validate_title(title: &str, limit: TitleLimit) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("title", "Title is required."));
    }
    let max = limit.max_chars();
    if title.chars().count() > max {
        return Err(Error::validation(
            "title",
            format!("Title must be {} characters or fewer.", max),
        ));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<()> {
    validate_content_only(content)?;
    if content.chars().count() > CONTENT_MAX {
        return Err(Error::validation(
            "content",
            "Content must be 10,000 characters or fewer.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { message, .. }) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_note_passes() {
        assert!(validate_note("Groceries", "milk, eggs", TitleLimit::Create).is_ok());
    }

    #[test]
    fn test_title_at_create_limit_passes() {
        let title = "a".repeat(200);
        assert!(validate_note(&title, "body", TitleLimit::Create).is_ok());
    }

    #[test]
    fn test_title_over_create_limit_fails() {
        let title = "a".repeat(201);
        assert_eq!(
            message(validate_note(&title, "body", TitleLimit::Create)),
            "Title must be 200 characters or fewer."
        );
    }

    #[test]
    fn test_title_at_update_limit_passes() {
        let title = "a".repeat(100);
        assert!(validate_note(&title, "body", TitleLimit::Update).is_ok());
    }

    #[test]
    fn test_title_over_update_limit_fails() {
        let title = "a".repeat(101);
        assert_eq!(
            message(validate_note(&title, "body", TitleLimit::Update)),
            "Title must be 100 characters or fewer."
        );
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 200 multi-byte characters is still within the limit
        let title = "가".repeat(200);
        assert!(validate_note(&title, "body", TitleLimit::Create).is_ok());
    }

    #[test]
    fn test_whitespace_title_is_required() {
        assert_eq!(
            message(validate_note("   \t", "body", TitleLimit::Create)),
            "Title is required."
        );
    }

    #[test]
    fn test_long_whitespace_title_reports_required() {
        let title = " ".repeat(500);
        assert_eq!(
            message(validate_note(&title, "body", TitleLimit::Create)),
            "Title is required."
        );
    }

    #[test]
    fn test_whitespace_content_is_required() {
        assert_eq!(
            message(validate_note("Title", "\n  \n", TitleLimit::Create)),
            "Content is required."
        );
    }

    #[test]
    fn test_content_at_limit_passes() {
        let content = "x".repeat(10_000);
        assert!(validate_note("Title", &content, TitleLimit::Update).is_ok());
    }

    #[test]
    fn test_content_over_limit_fails() {
        let content = "x".repeat(10_001);
        assert_eq!(
            message(validate_note("Title", &content, TitleLimit::Create)),
            "Content must be 10,000 characters or fewer."
        );
    }

    #[test]
    fn test_content_only_skips_length_maximum() {
        let content = "x".repeat(10_001);
        assert!(validate_content_only(&content).is_ok());
    }

    #[test]
    fn test_content_only_rejects_blank() {
        assert_eq!(message(validate_content_only("  ")), "Content is required.");
    }

    #[test]
    fn test_validation_error_names_field() {
        match validate_note("", "body", TitleLimit::Create) {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "title"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
