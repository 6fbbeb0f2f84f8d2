//! Handlers for referral codes.

use axum::extract::{Query, State};
use axum::Json;
use motormate_core::error::CoreError;
use motormate_core::referral::{self, REFEREE_POINTS, REFERRER_POINTS};
use motormate_core::types::UserId;
use motormate_db::repositories::ReferralRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Attempts at generating a collision-free code before giving up.
const GENERATE_ATTEMPTS: usize = 3;

/// Referees shown on the stats screen.
const RECENT_REFERRALS_LIMIT: i64 = 5;

/// Request body for `POST /referrals/generate-code`.
#[derive(Debug, Deserialize)]
pub struct GenerateCodeRequest {
    pub user_id: UserId,
}

/// POST /api/v1/referrals/generate-code
///
/// Create (or rotate) the user's referral code. Code uniqueness is
/// database-enforced; on the rare collision we regenerate.
pub async fn generate_code(
    State(state): State<AppState>,
    Json(input): Json<GenerateCodeRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let mut last_err = None;
    for _ in 0..GENERATE_ATTEMPTS {
        let code = referral::generate_code();
        match ReferralRepo::upsert_code(&state.pool, input.user_id, &code).await {
            Ok(record) => {
                return Ok(Json(serde_json::json!({
                    "data": { "referral_code": record.referral_code }
                })))
            }
            Err(e) if is_unique_violation(&e) => last_err = Some(e),
            Err(e) => return Err(e.into()),
        }
    }
    Err(last_err
        .map(AppError::Database)
        .unwrap_or_else(|| AppError::InternalError("code generation failed".into())))
}

/// Request body for `POST /referrals/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyReferralRequest {
    pub user_id: UserId,
    pub referral_code: String,
}

/// Response payload for `POST /referrals/apply`.
#[derive(Debug, Serialize)]
pub struct ApplyReferralResponse {
    pub referrer_reward: i32,
    pub referee_reward: i32,
}

/// POST /api/v1/referrals/apply
///
/// Apply someone else's referral code. Both sides are paid through the
/// ledger in one transaction; the unique constraint on the referee makes
/// a second application a 409.
pub async fn apply(
    State(state): State<AppState>,
    Json(input): Json<ApplyReferralRequest>,
) -> AppResult<Json<DataResponse<ApplyReferralResponse>>> {
    let code = input.referral_code.trim();
    if code.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Referral code is required".to_string(),
        )));
    }

    let referrer = ReferralRepo::find_by_code(&state.pool, code)
        .await?
        .ok_or_else(|| CoreError::not_found("Referral code", code))?;

    if referrer.user_id == input.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot use your own referral code".to_string(),
        )));
    }

    ReferralRepo::apply(&state.pool, referrer.user_id, input.user_id, code).await?;

    Ok(Json(DataResponse {
        data: ApplyReferralResponse {
            referrer_reward: REFERRER_POINTS,
            referee_reward: REFEREE_POINTS,
        },
    }))
}

/// Query parameters for `GET /referrals/stats`.
#[derive(Debug, Deserialize)]
pub struct ReferralStatsQuery {
    pub user_id: UserId,
}

/// GET /api/v1/referrals/stats
///
/// The user's code, total referral count, and most recent referees.
pub async fn stats(
    State(state): State<AppState>,
    Query(params): Query<ReferralStatsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let referral = ReferralRepo::get_for_user(&state.pool, params.user_id).await?;
    let total = ReferralRepo::count_for_referrer(&state.pool, params.user_id).await?;
    let recent =
        ReferralRepo::recent_uses(&state.pool, params.user_id, RECENT_REFERRALS_LIMIT).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "referral_code": referral.map(|r| r.referral_code),
            "total_referrals": total,
            "recent_referrals": recent,
        }
    })))
}

/// Whether a sqlx error is a Postgres unique violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
