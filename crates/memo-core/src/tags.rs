//! Tag parsing, normalization, and quality checks.
//!
//! Tags are short lowercase labels. The model is asked for a comma-separated
//! list but routinely answers with semicolons, line breaks, numbering or
//! hashtags, so parsing is lenient and the output is always bounded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::defaults::{TAG_MAX_COUNT, TAG_MAX_LEN, TAG_MIN_LEN};
use crate::error::{Error, Result};

/// Result of a quality check over model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

impl QualityReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }
}

fn within_length_bounds(tag: &str) -> bool {
    let len = tag.chars().count();
    (TAG_MIN_LEN..=TAG_MAX_LEN).contains(&len)
}

/// Parse raw model text into a tag list.
///
/// Splits on `,` `;` and newlines, drops every character that is not
/// alphanumeric, `_` or whitespace, lowercases, keeps 2–20 character tags,
/// removes duplicates (first occurrence wins) and keeps at most six.
pub fn parse_tags(raw: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let tags: Vec<String> = raw
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(|candidate| {
            candidate
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
                .collect::<String>()
                .trim()
                .to_lowercase()
        })
        .filter(|tag| within_length_bounds(tag))
        .filter(|tag| seen.insert(tag.clone()))
        .take(TAG_MAX_COUNT)
        .collect();

    if tags.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(tags)
}

/// Normalize an already-split tag list: trim, lowercase, bound, cap.
///
/// Unlike [`parse_tags`] punctuation such as `-` is preserved.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| within_length_bounds(tag))
        .take(TAG_MAX_COUNT)
        .collect()
}

/// Report problems with a tag list without modifying it.
pub fn validate_tag_quality<S: AsRef<str>>(tags: &[S]) -> QualityReport {
    if tags.is_empty() {
        return QualityReport::from_issues(vec!["No tags were provided.".to_string()]);
    }

    let mut issues = Vec::new();
    if tags.len() > TAG_MAX_COUNT {
        issues.push(format!("More than {} tags.", TAG_MAX_COUNT));
    }

    for (index, tag) in tags.iter().enumerate() {
        let tag = tag.as_ref();
        let position = index + 1;
        let len = tag.chars().count();
        if tag.trim().is_empty() {
            issues.push(format!("Tag {} is empty.", position));
        } else if len < TAG_MIN_LEN {
            issues.push(format!("Tag {} is too short: \"{}\"", position, tag));
        } else if len > TAG_MAX_LEN {
            issues.push(format!("Tag {} is too long: \"{}\"", position, tag));
        }
    }

    let unique: HashSet<&str> = tags.iter().map(AsRef::as_ref).collect();
    if unique.len() != tags.len() {
        issues.push("Duplicate tags found.".to_string());
    }

    QualityReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let tags = parse_tags("tag1, tag2; tag3\ntag4").unwrap();
        assert_eq!(tags, vec!["tag1", "tag2", "tag3", "tag4"]);
    }

    #[test]
    fn test_parse_strips_punctuation_and_lowercases() {
        let tags = parse_tags("#Rust, **Async IO**, web-dev").unwrap();
        assert_eq!(tags, vec!["rust", "async io", "webdev"]);
    }

    #[test]
    fn test_parse_keeps_non_latin_letters() {
        let tags = parse_tags("개발, 데이터베이스").unwrap();
        assert_eq!(tags, vec!["개발", "데이터베이스"]);
    }

    #[test]
    fn test_parse_drops_out_of_bounds() {
        let tags = parse_tags("a, ok, this-tag-is-way-too-long-to-keep").unwrap();
        assert_eq!(tags, vec!["ok"]);
    }

    #[test]
    fn test_parse_caps_at_six() {
        let tags = parse_tags("t1, t2, t3, t4, t5, t6, t7, t8").unwrap();
        assert_eq!(tags, vec!["t1", "t2", "t3", "t4", "t5", "t6"]);
    }

    #[test]
    fn test_parse_dedupes_before_cap() {
        let tags = parse_tags("aa, AA, bb, bb, cc, dd, ee, ff, gg").unwrap();
        assert_eq!(tags, vec!["aa", "bb", "cc", "dd", "ee", "ff"]);
    }

    #[test]
    fn test_parse_nothing_usable_is_empty_response() {
        assert!(matches!(parse_tags("!, ?, -"), Err(Error::EmptyResponse)));
        assert!(matches!(parse_tags(""), Err(Error::EmptyResponse)));
    }

    #[test]
    fn test_normalize_filters_by_length() {
        let tags = normalize_tags(&[
            "a",
            "valid-tag",
            "x",
            "very-long-tag-name-that-exceeds-limit",
        ]);
        assert_eq!(tags, vec!["valid-tag"]);
    }

    #[test]
    fn test_normalize_caps_at_six() {
        let input: Vec<String> = (1..=9).map(|i| format!("  Tag{} ", i)).collect();
        let tags = normalize_tags(&input);
        assert_eq!(tags.len(), 6);
        assert_eq!(tags[0], "tag1");
        assert_eq!(tags[5], "tag6");
    }

    #[test]
    fn test_quality_empty_list() {
        let report = validate_tag_quality::<&str>(&[]);
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_quality_valid_list() {
        let report = validate_tag_quality(&["rust", "web"]);
        assert!(report.is_valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_quality_reports_positions() {
        let report = validate_tag_quality(&["ok", "x", " ", "abcdefghijklmnopqrstuvwxyz"]);
        assert!(!report.is_valid);
        assert_eq!(
            report.issues,
            vec![
                "Tag 2 is too short: \"x\"".to_string(),
                "Tag 3 is empty.".to_string(),
                "Tag 4 is too long: \"abcdefghijklmnopqrstuvwxyz\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_quality_too_many_and_duplicates() {
        let report = validate_tag_quality(&["aa", "bb", "cc", "dd", "ee", "ff", "aa"]);
        assert!(!report.is_valid);
        assert!(report.issues.contains(&"More than 6 tags.".to_string()));
        assert!(report.issues.contains(&"Duplicate tags found.".to_string()));
    }
}
