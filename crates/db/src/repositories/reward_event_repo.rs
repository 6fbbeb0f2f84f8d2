//! Repository for the append-only `reward_events` ledger.

use motormate_core::types::UserId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::reward::RewardEvent;

/// Column list for `reward_events` queries.
const COLUMNS: &str = "id, user_id, points_awarded, action_type, metadata, earned_at";

/// Writes and reads the points ledger.
///
/// Every write pairs the ledger insert with an atomic increment of
/// `user_stats.total_points` so the denormalized total always equals the
/// ledger sum. Idempotence is the caller's responsibility.
pub struct RewardEventRepo;

impl RewardEventRepo {
    /// Append a ledger row and bump the user's total, as one transaction.
    ///
    /// `points` may be negative for debits (redemption). Returns the
    /// created event and the new total.
    pub async fn award(
        pool: &PgPool,
        user_id: UserId,
        points: i32,
        action_type: &str,
        metadata: &serde_json::Value,
    ) -> Result<(RewardEvent, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = Self::record(&mut tx, user_id, points, action_type, metadata).await?;
        tx.commit().await?;
        Ok(result)
    }

    /// Ledger insert + counter increment inside the caller's transaction.
    ///
    /// Used by the streak evaluator, achievement unlocks, referrals and
    /// redemption so their surrounding writes commit or roll back together
    /// with the award. Creates the stats row on a user's first event.
    pub async fn record(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        points: i32,
        action_type: &str,
        metadata: &serde_json::Value,
    ) -> Result<(RewardEvent, i64), sqlx::Error> {
        sqlx::query("INSERT INTO user_stats (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO reward_events (user_id, points_awarded, action_type, metadata) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let event = sqlx::query_as::<_, RewardEvent>(&insert_query)
            .bind(user_id)
            .bind(points)
            .bind(action_type)
            .bind(metadata)
            .fetch_one(&mut **tx)
            .await?;

        let new_total: i64 = sqlx::query_scalar(
            "UPDATE user_stats \
             SET total_points = total_points + $2, updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING total_points",
        )
        .bind(user_id)
        .bind(points as i64)
        .fetch_one(&mut **tx)
        .await?;

        Ok((event, new_total))
    }

    /// Recent ledger rows for a user, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RewardEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reward_events \
             WHERE user_id = $1 \
             ORDER BY earned_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, RewardEvent>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
