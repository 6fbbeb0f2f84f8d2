//! Repository for referral codes and their uses.

use motormate_core::points::ActionType;
use motormate_core::referral::{REFEREE_POINTS, REFERRER_POINTS};
use motormate_core::types::UserId;
use serde_json::json;
use sqlx::PgPool;

use crate::models::referral::{ReferralUse, UserReferral};
use crate::repositories::RewardEventRepo;

/// Column list for `user_referrals` queries.
const REFERRAL_COLUMNS: &str = "id, user_id, referral_code, created_at, updated_at";

/// Column list for `referral_uses` queries.
const USE_COLUMNS: &str = "id, referrer_id, referee_id, referral_code, created_at";

/// Reads and writes referral state.
pub struct ReferralRepo;

impl ReferralRepo {
    /// The user's referral record, if a code was ever generated.
    pub async fn get_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserReferral>, sqlx::Error> {
        let query = format!("SELECT {REFERRAL_COLUMNS} FROM user_referrals WHERE user_id = $1");
        sqlx::query_as::<_, UserReferral>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the user's referral code.
    pub async fn upsert_code(
        pool: &PgPool,
        user_id: UserId,
        code: &str,
    ) -> Result<UserReferral, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_referrals (user_id, referral_code) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) \
             DO UPDATE SET referral_code = EXCLUDED.referral_code, updated_at = NOW() \
             RETURNING {REFERRAL_COLUMNS}"
        );
        sqlx::query_as::<_, UserReferral>(&query)
            .bind(user_id)
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// Resolve a code to its owner.
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<UserReferral>, sqlx::Error> {
        let query = format!(
            "SELECT {REFERRAL_COLUMNS} FROM user_referrals WHERE referral_code = $1"
        );
        sqlx::query_as::<_, UserReferral>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Apply a referral: record the use and award both sides through the
    /// ledger, all in one transaction.
    ///
    /// The unique constraint on `referee_id` rejects a second use; the
    /// resulting constraint violation surfaces as a conflict to the caller.
    pub async fn apply(
        pool: &PgPool,
        referrer_id: UserId,
        referee_id: UserId,
        code: &str,
    ) -> Result<ReferralUse, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO referral_uses (referrer_id, referee_id, referral_code) \
             VALUES ($1, $2, $3) \
             RETURNING {USE_COLUMNS}"
        );
        let referral_use = sqlx::query_as::<_, ReferralUse>(&insert_query)
            .bind(referrer_id)
            .bind(referee_id)
            .bind(code)
            .fetch_one(&mut *tx)
            .await?;

        RewardEventRepo::record(
            &mut tx,
            referrer_id,
            REFERRER_POINTS,
            ActionType::SuccessfulReferral.as_str(),
            &json!({ "referee_id": referee_id }),
        )
        .await?;

        RewardEventRepo::record(
            &mut tx,
            referee_id,
            REFEREE_POINTS,
            ActionType::ReferralBonus.as_str(),
            &json!({ "referrer_id": referrer_id }),
        )
        .await?;

        tx.commit().await?;
        Ok(referral_use)
    }

    /// Number of successful referrals attributed to a user.
    pub async fn count_for_referrer(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM referral_uses WHERE referrer_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Most recent referees for a user's referral stats screen.
    pub async fn recent_uses(
        pool: &PgPool,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<ReferralUse>, sqlx::Error> {
        let query = format!(
            "SELECT {USE_COLUMNS} FROM referral_uses \
             WHERE referrer_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, ReferralUse>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
