//! Prompt templates for summary and tag generation.

/// Prompt asking for a 3–6 point plain-text summary.
pub fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following note in 3 to 6 concise key points. \
Put each point on its own line and keep the essential information. \
Write plain text only: no markdown, bullets, numbering or special symbols.\n\n\
Note:\n{}\n\nSummary:",
        content
    )
}

/// Prompt asking for up to six comma-separated tags.
pub fn tag_prompt(content: &str) -> String {
    format!(
        "Analyze the following note and produce up to 6 of the most relevant tags. \
Return only the tags, separated by commas.\n\n\
Note:\n{}\n\nTags:",
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_embeds_content() {
        let prompt = summary_prompt("meeting at noon");
        assert!(prompt.contains("meeting at noon"));
        assert!(prompt.contains("3 to 6"));
        assert!(prompt.ends_with("Summary:"));
    }

    #[test]
    fn test_tag_prompt_embeds_content() {
        let prompt = tag_prompt("rust borrow checker");
        assert!(prompt.contains("rust borrow checker"));
        assert!(prompt.contains("up to 6"));
        assert!(prompt.ends_with("Tags:"));
    }
}
