//! Profile Routes
//!
//! - GET /api/v1/profile - Signed-in user's name, streak and greeting
//! - POST /api/v1/session/logout - End the session

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::ProfileResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::TopNav;

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<Arc<AppState>>) -> ApiResult<Json<ProfileResponse>> {
    let profile = state
        .identity
        .current_profile()
        .await?
        .ok_or_else(|| ApiError::NotFound("no user is signed in".to_string()))?;

    let nav = TopNav::from_profile(profile);

    Ok(Json(ProfileResponse {
        name: nav.user_name().to_string(),
        streak: nav.streak(),
        greeting: nav.greeting(),
    }))
}

/// POST /api/v1/session/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    let mut nav = TopNav::new();
    nav.logout(state.identity.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}
