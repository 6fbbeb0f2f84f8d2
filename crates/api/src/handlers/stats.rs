//! Handlers for user stats and the leaderboard.

use axum::extract::{Path, Query, State};
use axum::Json;
use motormate_core::error::CoreError;
use motormate_core::types::UserId;
use motormate_db::repositories::UserStatsRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Maximum leaderboard page size.
const MAX_LIMIT: i64 = 100;

/// Default leaderboard size.
const DEFAULT_LIMIT: i64 = 10;

/// GET /api/v1/users/{user_id}/stats
///
/// The user's stats row. 404 until their first recorded activity.
pub async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<serde_json::Value>> {
    let stats = UserStatsRepo::get(&state.pool, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User stats", user_id))?;

    Ok(Json(serde_json::json!({ "data": stats })))
}

/// Query parameters for `GET /leaderboard`.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Maximum number of entries. Defaults to 10, capped at 100.
    pub limit: Option<i64>,
}

/// GET /api/v1/leaderboard
///
/// Top users by total points.
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = UserStatsRepo::top_by_points(&state.pool, limit).await?;

    Ok(Json(serde_json::json!({ "data": entries })))
}
