//! Shared application state.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{Quota, RateLimiter};

use memo_core::AuthProvider;
use memo_inference::CallLogger;

use crate::config::RateLimitConfig;
use crate::services::{GenerationService, NoteService};

/// Global rate limiter type (direct quota, no keyed bucketing for personal server).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    /// Ad-hoc generation (playground) and availability reporting.
    pub generation: GenerationService,
    pub call_log: Arc<CallLogger>,
    pub auth: Arc<dyn AuthProvider>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

/// Build the global limiter, or `None` when disabled.
pub fn build_rate_limiter(config: &RateLimitConfig) -> Option<Arc<GlobalRateLimiter>> {
    if !config.enabled {
        return None;
    }
    let quota = Quota::with_period(config.period)?.allow_burst(NonZeroU32::new(config.requests)?);
    Some(Arc::new(RateLimiter::direct(quota)))
}
