//! Onboarding status handlers.

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;

use super::{ok, ok_empty};
use crate::auth::MaybeUser;
use crate::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct OnboardingStatus {
    pub completed: bool,
}

/// Whether the caller finished onboarding; anonymous callers get `false`.
pub async fn onboarding_status(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<impl IntoResponse, ApiError> {
    let completed = state.notes.onboarding_status(user.as_ref()).await?;
    Ok(ok(OnboardingStatus { completed }))
}

pub async fn complete_onboarding(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.complete_onboarding(user.as_ref()).await?;
    Ok(ok_empty())
}

pub async fn skip_onboarding(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.skip_onboarding(user.as_ref()).await?;
    Ok(ok_empty())
}
