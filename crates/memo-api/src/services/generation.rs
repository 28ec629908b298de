//! AI generation with call logging.
//!
//! Wraps [`AiGateway`] so that every summary or tag request is timed and
//! recorded in the shared [`CallLogger`], and provider failures are named
//! after the sub-call that produced them.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use memo_core::{
    validate_summary_quality, validate_tag_quality, Error, GeneratedArtifacts, Result,
    SummaryResponse, TagResponse,
};
use memo_inference::{AiGateway, ApiOperation, CallLogger};

/// Summary and tag generation, logged.
#[derive(Clone)]
pub struct GenerationService {
    gateway: AiGateway,
    call_log: Arc<CallLogger>,
}

impl GenerationService {
    pub fn new(gateway: AiGateway, call_log: Arc<CallLogger>) -> Self {
        Self { gateway, call_log }
    }

    pub fn gateway(&self) -> &AiGateway {
        &self.gateway
    }

    pub fn call_log(&self) -> &Arc<CallLogger> {
        &self.call_log
    }

    /// Summarize `content`; failures read "Summary generation failed: ...".
    pub async fn summarize(&self, content: &str) -> Result<SummaryResponse> {
        let start = Instant::now();
        let result = self.gateway.summarize(content).await;
        let elapsed = elapsed_ms(start);
        match result {
            Ok(summary) => {
                self.log_success(ApiOperation::Summarize, elapsed, summary.token_count, &summary.model);
                let report = validate_summary_quality(&summary.content);
                if !report.is_valid {
                    warn!(subsystem = "api", component = "generation", issues = ?report.issues, "Summary failed quality check");
                }
                Ok(summary)
            }
            Err(e) => Err(self.log_failure(ApiOperation::Summarize, content, e)),
        }
    }

    /// Generate tags for `content`; failures read "Tag generation failed: ...".
    pub async fn tags(&self, content: &str) -> Result<TagResponse> {
        let start = Instant::now();
        let result = self.gateway.generate_tags(content).await;
        let elapsed = elapsed_ms(start);
        match result {
            Ok(tags) => {
                self.log_success(ApiOperation::Tag, elapsed, tags.token_count, &tags.model);
                let report = validate_tag_quality(&tags.tags);
                if !report.is_valid {
                    warn!(subsystem = "api", component = "generation", issues = ?report.issues, "Tags failed quality check");
                }
                Ok(tags)
            }
            Err(e) => Err(self.log_failure(ApiOperation::Tag, content, e)),
        }
    }

    /// Run both concurrently. A summary failure is reported before a tag
    /// failure; the other result is discarded.
    pub async fn both(&self, content: &str) -> Result<GeneratedArtifacts> {
        let (summary, tags) = tokio::join!(self.summarize(content), self.tags(content));
        Ok(GeneratedArtifacts {
            summary: summary?,
            tags: tags?,
        })
    }

    fn log_success(&self, op: ApiOperation, duration_ms: u64, tokens: Option<usize>, model: &str) {
        debug!(
            subsystem = "api",
            component = "generation",
            op = %op,
            duration_ms,
            token_count = tokens,
            model,
            "Generation succeeded"
        );
        self.call_log.log_success(
            op,
            duration_ms,
            tokens.map(|t| t as u64),
            Some(model),
        );
    }

    fn log_failure(&self, op: ApiOperation, content: &str, err: Error) -> Error {
        if matches!(err, Error::Validation { .. }) {
            return err;
        }

        let message = err.user_message();
        let context = serde_json::json!({
            "content_length": content.chars().count(),
            "model": self.gateway.model_name(),
        });
        self.call_log.log_error(op, &message, Some(&context));
        warn!(subsystem = "api", component = "generation", op = %op, error = %err, "Generation failed");

        let label = match op {
            ApiOperation::Tag => "Tag",
            ApiOperation::Summarize | ApiOperation::ClientInit => "Summary",
        };
        Error::Inference(format!("{} generation failed: {}", label, message))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
