//! Handlers for the reward catalog and redemption.

use axum::extract::State;
use axum::Json;
use motormate_core::error::CoreError;
use motormate_core::rewards::{redemption_payload, RewardKind};
use motormate_core::types::{DbId, UserId};
use motormate_db::models::notification::NewNotification;
use motormate_db::models::reward::RewardRedemption;
use motormate_db::repositories::{NotificationRepo, RewardRepo, UserStatsRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/rewards/catalog
///
/// Active redeemable rewards, cheapest first.
pub async fn catalog(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let entries = RewardRepo::list_catalog(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": entries })))
}

/// Request body for `POST /rewards/redeem`.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub user_id: UserId,
    pub reward_id: DbId,
}

/// Response payload for `POST /rewards/redeem`.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub redemption: RewardRedemption,
    pub new_balance: i64,
    pub reward_details: serde_json::Value,
}

/// POST /api/v1/rewards/redeem
///
/// Redeem a catalog reward: checks balance and per-user limits, then
/// records the redemption and debits the points ledger in one
/// transaction. The confirmation notification is best-effort.
pub async fn redeem(
    State(state): State<AppState>,
    Json(input): Json<RedeemRequest>,
) -> AppResult<Json<DataResponse<RedeemResponse>>> {
    let entry = RewardRepo::find_catalog_entry(&state.pool, input.reward_id)
        .await?
        .filter(|e| e.is_active)
        .ok_or_else(|| CoreError::not_found("Reward", input.reward_id))?;

    let stats = UserStatsRepo::get(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User stats", input.user_id))?;

    if stats.total_points < entry.points_required as i64 {
        return Err(AppError::Core(CoreError::Conflict(
            "Insufficient points".to_string(),
        )));
    }

    if let Some(max) = entry.max_redemptions_per_user {
        let used = RewardRepo::redemption_count(&state.pool, input.user_id, entry.id).await?;
        if used >= max as i64 {
            return Err(AppError::Core(CoreError::Conflict(
                "Reward already redeemed".to_string(),
            )));
        }
    }

    let kind: RewardKind = entry
        .reward_type
        .parse()
        .map_err(|_| AppError::InternalError(format!("bad reward_type: {}", entry.reward_type)))?;
    let details = redemption_payload(kind, entry.value, &entry.metadata);

    let (redemption, new_balance) =
        RewardRepo::redeem(&state.pool, input.user_id, &entry, &details).await?;

    let notification = NewNotification {
        user_id: input.user_id,
        kind: "reward_redemption".to_string(),
        title: "Reward Redeemed!".to_string(),
        message: format!(
            "You successfully redeemed \"{}\" for {} points.",
            entry.name, entry.points_required
        ),
        data: serde_json::json!({
            "reward_id": entry.id,
            "redemption_id": redemption.id,
        }),
    };
    if let Err(e) = NotificationRepo::create(&state.pool, &notification).await {
        tracing::error!(user_id = %input.user_id, error = %e,
            "Failed to insert redemption notification");
    }

    Ok(Json(DataResponse {
        data: RedeemResponse {
            redemption,
            new_balance,
            reward_details: details,
        },
    }))
}
