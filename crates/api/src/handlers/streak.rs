//! Handler for the daily streak evaluation RPC.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use motormate_core::types::UserId;
use motormate_db::repositories::UserStatsRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /streak/evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateStreakRequest {
    pub user_id: UserId,
}

/// Response payload for `POST /streak/evaluate`.
#[derive(Debug, Serialize)]
pub struct EvaluateStreakResponse {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub streak_bonus_awarded: bool,
}

/// POST /api/v1/streak/evaluate
///
/// Advance the user's streak to today (UTC). Safe to call repeatedly: the
/// evaluation is idempotent within a calendar day and serializes against
/// concurrent calls for the same user.
pub async fn evaluate(
    State(state): State<AppState>,
    Json(input): Json<EvaluateStreakRequest>,
) -> AppResult<Json<DataResponse<EvaluateStreakResponse>>> {
    let outcome = UserStatsRepo::evaluate_streak(&state.pool, input.user_id, Utc::now()).await?;

    Ok(Json(DataResponse {
        data: EvaluateStreakResponse {
            current_streak: outcome.current_streak,
            longest_streak: outcome.longest_streak,
            streak_bonus_awarded: outcome.bonus_awarded,
        },
    }))
}
