//! Handlers for the points ledger.

use axum::extract::{Query, State};
use axum::Json;
use motormate_core::points::ActionType;
use motormate_core::types::UserId;
use motormate_db::models::reward::RewardEvent;
use motormate_db::repositories::RewardEventRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for ledger history.
const MAX_LIMIT: i64 = 100;

/// Default page size for ledger history.
const DEFAULT_LIMIT: i64 = 50;

/// Largest single award or debit accepted from a caller.
const MAX_ABS_POINTS: i64 = 100_000;

/// Request body for `POST /points/award`.
#[derive(Debug, Deserialize, Validate)]
pub struct AwardPointsRequest {
    pub user_id: UserId,
    /// May be negative for debits; callers pre-check balances.
    #[validate(range(min = -100_000, max = 100_000))]
    pub points: i32,
    pub action_type: String,
    pub metadata: Option<serde_json::Value>,
}

/// Response payload for `POST /points/award`.
#[derive(Debug, Serialize)]
pub struct AwardPointsResponse {
    pub event: RewardEvent,
    pub total_points: i64,
}

/// POST /api/v1/points/award
///
/// Append a ledger event and update the user's running total atomically.
/// This endpoint makes no idempotence guarantee; callers must not submit
/// the same logical event twice.
pub async fn award(
    State(state): State<AppState>,
    Json(input): Json<AwardPointsRequest>,
) -> AppResult<Json<DataResponse<AwardPointsResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(format!("points must be within ±{MAX_ABS_POINTS}: {e}")))?;

    let action: ActionType = input.action_type.parse().map_err(AppError::Core)?;
    let metadata = input.metadata.unwrap_or_else(|| serde_json::json!({}));

    let (event, total_points) = RewardEventRepo::award(
        &state.pool,
        input.user_id,
        input.points,
        action.as_str(),
        &metadata,
    )
    .await?;

    Ok(Json(DataResponse {
        data: AwardPointsResponse {
            event,
            total_points,
        },
    }))
}

/// Query parameters for `GET /points/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: UserId,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// GET /api/v1/points/history
///
/// Recent ledger events for a user, newest first.
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let events =
        RewardEventRepo::list_recent(&state.pool, params.user_id, limit, offset).await?;

    Ok(Json(serde_json::json!({ "data": events })))
}
