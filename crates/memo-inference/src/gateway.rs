//! Summary and tag generation over a pluggable backend.
//!
//! Per call the gateway either answers with the fixed placeholder (no backend
//! configured) or validates, truncates, prompts, and parses. It never writes
//! to the call log for summarize/tag calls; callers time and record those.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use memo_core::defaults::{
    FALLBACK_MODEL, SUMMARY_MAX_OUTPUT_TOKENS, SUMMARY_TEMPERATURE, TAG_MAX_OUTPUT_TOKENS,
    TAG_TEMPERATURE, TOKEN_BUDGET,
};
use memo_core::{
    estimate_tokens, exceeds_token_limit, parse_summary, parse_tags, truncate_to_token_limit, Error,
    GenerationBackend,
    GenerationParams, Result, SummaryResponse, TagResponse,
};

use crate::call_log::{ApiOperation, CallLogger};
use crate::config::GeminiConfig;
use crate::gemini::GeminiBackend;
use crate::prompts::{summary_prompt, tag_prompt};

/// Placeholder summary returned when no API key is configured.
pub const FALLBACK_SUMMARY: &str = "Set a Gemini API key to enable AI summaries.\n\n\
This message is shown while no API key is configured.\n\n\
With a key configured, a real AI summary is generated.";

/// Placeholder tags returned when no API key is configured.
pub const FALLBACK_TAGS: [&str; 2] = ["ai-required", "api-key-missing"];

const SUMMARY_PARAMS: GenerationParams = GenerationParams {
    temperature: SUMMARY_TEMPERATURE,
    max_output_tokens: SUMMARY_MAX_OUTPUT_TOKENS,
};

const TAG_PARAMS: GenerationParams = GenerationParams {
    temperature: TAG_TEMPERATURE,
    max_output_tokens: TAG_MAX_OUTPUT_TOKENS,
};

/// Entry point for AI features.
#[derive(Clone)]
pub struct AiGateway {
    backend: Option<Arc<dyn GenerationBackend>>,
}

impl AiGateway {
    /// Gateway over an explicit backend; `None` always answers with placeholders.
    pub fn new(backend: Option<Arc<dyn GenerationBackend>>) -> Self {
        Self { backend }
    }

    /// Gateway that always answers with placeholders.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Build the Gemini-backed gateway and record the outcome as a `client_init` call.
    ///
    /// A missing key is not a failure: it logs a warning and yields a
    /// placeholder-only gateway. A client that cannot be built is recorded as a
    /// failed `client_init` and also degrades to placeholders.
    pub fn initialize(config: &GeminiConfig, call_log: &CallLogger) -> Self {
        if !config.has_api_key() {
            warn!(
                subsystem = "inference",
                component = "gateway",
                "GEMINI_API_KEY is not configured; AI features return placeholder results"
            );
            return Self::disabled();
        }

        let start = Instant::now();
        match GeminiBackend::new(config) {
            Ok(backend) => {
                call_log.log_success(
                    ApiOperation::ClientInit,
                    start.elapsed().as_millis() as u64,
                    None,
                    Some(&config.model),
                );
                info!(
                    subsystem = "inference",
                    component = "gateway",
                    model = %config.model,
                    "Gemini client initialized"
                );
                Self::new(Some(Arc::new(backend)))
            }
            Err(e) => {
                call_log.log_error(ApiOperation::ClientInit, &e.to_string(), None);
                Self::disabled()
            }
        }
    }

    /// Whether a real backend is configured.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Model name reported on results.
    pub fn model_name(&self) -> &str {
        self.backend
            .as_deref()
            .map(|b| b.model_name())
            .unwrap_or(FALLBACK_MODEL)
    }

    /// Summarize note content into 3–6 plain-text key points.
    pub async fn summarize(&self, content: &str) -> Result<SummaryResponse> {
        let Some(backend) = self.backend.as_deref() else {
            return Ok(fallback_summary());
        };
        if content.trim().is_empty() {
            return Err(Error::validation("content", "There is no content to summarize."));
        }

        let truncated = fit_to_budget(content);
        let text = self
            .invoke(backend, &summary_prompt(&truncated), &SUMMARY_PARAMS, "summarize")
            .await?;
        let tokens = estimate_tokens(&truncated) + estimate_tokens(&text);
        parse_summary(&text, backend.model_name(), Some(tokens))
    }

    /// Generate up to six tags for note content.
    pub async fn generate_tags(&self, content: &str) -> Result<TagResponse> {
        let Some(backend) = self.backend.as_deref() else {
            return Ok(fallback_tags());
        };
        if content.trim().is_empty() {
            return Err(Error::validation(
                "content",
                "There is no content to generate tags from.",
            ));
        }

        let truncated = fit_to_budget(content);
        let text = self
            .invoke(backend, &tag_prompt(&truncated), &TAG_PARAMS, "tag")
            .await?;
        let tags = parse_tags(&text)?;
        Ok(TagResponse {
            tags,
            model: backend.model_name().to_string(),
            created_at: Utc::now(),
            token_count: Some(estimate_tokens(&truncated) + estimate_tokens(&text)),
        })
    }

    /// Run summary and tag generation concurrently.
    pub async fn generate_both(
        &self,
        content: &str,
    ) -> (Result<SummaryResponse>, Result<TagResponse>) {
        tokio::join!(self.summarize(content), self.generate_tags(content))
    }

    async fn invoke(
        &self,
        backend: &dyn GenerationBackend,
        prompt: &str,
        params: &GenerationParams,
        op: &'static str,
    ) -> Result<String> {
        debug!(
            subsystem = "inference",
            component = "gateway",
            op,
            prompt_len = prompt.len(),
            "Calling generation backend"
        );
        let text = backend.generate(prompt, params).await.map_err(|e| match e {
            inference @ Error::Inference(_) => inference,
            other => Error::Inference(other.to_string()),
        })?;
        if text.trim().is_empty() {
            return Err(Error::EmptyResponse);
        }
        Ok(text)
    }
}

/// Truncate content to the prompt token budget.
fn fit_to_budget(content: &str) -> String {
    if !exceeds_token_limit(content, TOKEN_BUDGET) {
        return content.to_string();
    }
    debug!(
        subsystem = "inference",
        component = "gateway",
        token_count = estimate_tokens(content),
        budget = TOKEN_BUDGET,
        "Content exceeds token budget, truncating"
    );
    truncate_to_token_limit(content, TOKEN_BUDGET)
}

/// Placeholder summary result.
pub fn fallback_summary() -> SummaryResponse {
    SummaryResponse {
        content: FALLBACK_SUMMARY.to_string(),
        model: FALLBACK_MODEL.to_string(),
        created_at: Utc::now(),
        token_count: None,
    }
}

/// Placeholder tag result.
pub fn fallback_tags() -> TagResponse {
    TagResponse {
        tags: FALLBACK_TAGS.iter().map(|t| t.to_string()).collect(),
        model: FALLBACK_MODEL.to_string(),
        created_at: Utc::now(),
        token_count: None,
    }
}
