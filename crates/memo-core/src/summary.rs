//! Summary parsing and quality checks.

use chrono::Utc;

use crate::defaults::{SUMMARY_MAX_LEN, SUMMARY_MAX_LINES, SUMMARY_MIN_LEN, SUMMARY_MIN_LINES};
use crate::error::{Error, Result};
use crate::models::SummaryResponse;
use crate::tags::QualityReport;

/// Wrap raw model text as a summary. Blank text is an empty response.
pub fn parse_summary(raw: &str, model: &str, token_count: Option<usize>) -> Result<SummaryResponse> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(SummaryResponse {
        content: content.to_string(),
        model: model.to_string(),
        created_at: Utc::now(),
        token_count,
    })
}

/// Report length and key-point count problems with a summary.
pub fn validate_summary_quality(summary: &str) -> QualityReport {
    let mut issues = Vec::new();
    let len = summary.chars().count();

    if summary.trim().is_empty() {
        issues.push("Summary is empty.".to_string());
    }
    if len < SUMMARY_MIN_LEN {
        issues.push("Summary is too short.".to_string());
    }
    if len > SUMMARY_MAX_LEN {
        issues.push("Summary is too long.".to_string());
    }

    let points = summary.lines().filter(|line| !line.trim().is_empty()).count();
    if points < SUMMARY_MIN_LINES {
        issues.push(format!("Summary has fewer than {} key points.", SUMMARY_MIN_LINES));
    }
    if points > SUMMARY_MAX_LINES {
        issues.push(format!("Summary has more than {} key points.", SUMMARY_MAX_LINES));
    }

    QualityReport {
        is_valid: issues.is_empty(),
        issues,
    }
}
