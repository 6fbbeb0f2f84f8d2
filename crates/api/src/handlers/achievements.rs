//! Handlers for achievement evaluation and listing.

use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::Json;
use motormate_core::achievements;
use motormate_core::types::UserId;
use motormate_db::models::achievement::Achievement;
use motormate_db::repositories::{AchievementRepo, GarageRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /achievements/check`.
#[derive(Debug, Deserialize)]
pub struct CheckAchievementsRequest {
    pub user_id: UserId,
}

/// Response payload for `POST /achievements/check`.
#[derive(Debug, Serialize)]
pub struct CheckAchievementsResponse {
    pub new_achievements: Vec<Achievement>,
    pub total_unlocked: usize,
}

/// POST /api/v1/achievements/check
///
/// Walk the catalog in order, unlock every newly satisfied entry, and pay
/// its points. Each unlock is its own atomic unit and the database's
/// unique constraint makes it at-most-once, so a lost race with a
/// concurrent check simply drops the entry from this call's results.
pub async fn check(
    State(state): State<AppState>,
    Json(input): Json<CheckAchievementsRequest>,
) -> AppResult<Json<DataResponse<CheckAchievementsResponse>>> {
    let snapshot = GarageRepo::snapshot(&state.pool, input.user_id).await?;
    let unlocked: HashSet<String> = AchievementRepo::unlocked_ids(&state.pool, input.user_id)
        .await?
        .into_iter()
        .collect();

    let mut new_achievements = Vec::new();
    for def in achievements::newly_satisfied(&snapshot, &unlocked) {
        if let Some(unlock) = AchievementRepo::unlock(&state.pool, input.user_id, def).await? {
            new_achievements.push(unlock);
        }
    }

    let total_unlocked = new_achievements.len();
    Ok(Json(DataResponse {
        data: CheckAchievementsResponse {
            new_achievements,
            total_unlocked,
        },
    }))
}

/// Query parameters for `GET /achievements`.
#[derive(Debug, Deserialize)]
pub struct ListAchievementsQuery {
    pub user_id: UserId,
}

/// GET /api/v1/achievements
///
/// All unlocks for a user, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAchievementsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let unlocks = AchievementRepo::list_for_user(&state.pool, params.user_id).await?;
    Ok(Json(serde_json::json!({ "data": unlocks })))
}
