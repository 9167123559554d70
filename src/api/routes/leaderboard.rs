//! Leaderboard Routes
//!
//! - GET /api/v1/leaderboard - Fetch, score and rank every user

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{LeaderboardParams, LeaderboardResponse, RankedEntryDto};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::LeaderboardView;

/// GET /api/v1/leaderboard
///
/// Records are fetched fresh on every call; a failed fetch returns 503
/// and no partial board.
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> ApiResult<Json<LeaderboardResponse>> {
    if params.limit == Some(0) {
        return Err(ApiError::Validation("limit must be at least 1".to_string()));
    }

    let view = LeaderboardView::load(state.identity.as_ref(), state.store.as_ref()).await?;

    let limit = params.limit.unwrap_or(usize::MAX);

    Ok(Json(LeaderboardResponse {
        podium: view.podium().iter().map(RankedEntryDto::from).collect(),
        entries: view
            .entries()
            .iter()
            .take(limit)
            .map(RankedEntryDto::from)
            .collect(),
        total: view.entries().len(),
        current_user: view.current_user().map(str::to_string),
        generated_at: view.generated_at(),
    }))
}
