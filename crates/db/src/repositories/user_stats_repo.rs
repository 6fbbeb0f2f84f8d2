//! Repository for the `user_stats` table.

use motormate_core::points::ActionType;
use motormate_core::streak::{self, StreakOutcome, WEEKLY_BONUS_POINTS};
use motormate_core::types::{Timestamp, UserId};
use serde_json::json;
use sqlx::PgPool;

use crate::models::stats::{LeaderboardEntry, UserStats};
use crate::repositories::RewardEventRepo;

/// Column list for `user_stats` queries.
const COLUMNS: &str = "id, user_id, current_streak, longest_streak, last_activity_date, \
    total_points, achievements_unlocked, rewards_redeemed, created_at, updated_at";

/// Reads and advances per-user engagement stats.
pub struct UserStatsRepo;

impl UserStatsRepo {
    /// Fetch a user's stats row, if they have been active at all.
    pub async fn get(pool: &PgPool, user_id: UserId) -> Result<Option<UserStats>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_stats WHERE user_id = $1");
        sqlx::query_as::<_, UserStats>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Advance the user's streak to `now` and persist the result.
    ///
    /// Runs as a single transaction: the stats row is created on first
    /// activity, locked with `FOR UPDATE` so concurrent evaluations
    /// serialize instead of double-incrementing, then updated. When the
    /// weekly bonus fires, the bonus ledger row and total bump join the
    /// same transaction. Same-day re-evaluation is a no-op by
    /// construction of [`streak::advance`].
    pub async fn evaluate_streak(
        pool: &PgPool,
        user_id: UserId,
        now: Timestamp,
    ) -> Result<StreakOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO user_stats (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let (current, longest, last_activity): (i32, i32, Option<Timestamp>) = sqlx::query_as(
            "SELECT current_streak, longest_streak, last_activity_date \
             FROM user_stats WHERE user_id = $1 \
             FOR UPDATE",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = streak::advance(
            last_activity.map(|t| t.date_naive()),
            now.date_naive(),
            current,
            longest,
        );

        sqlx::query(
            "UPDATE user_stats \
             SET current_streak = $2, longest_streak = $3, last_activity_date = $4, \
                 updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(outcome.current_streak)
        .bind(outcome.longest_streak)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if outcome.bonus_awarded {
            let metadata = json!({ "streak_count": outcome.current_streak });
            RewardEventRepo::record(
                &mut tx,
                user_id,
                WEEKLY_BONUS_POINTS,
                ActionType::StreakBonus.as_str(),
                &metadata,
            )
            .await?;
        }

        tx.commit().await?;
        Ok(outcome)
    }

    /// Bump the denormalized redemption counter.
    pub async fn increment_rewards_redeemed(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: UserId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_stats \
             SET rewards_redeemed = rewards_redeemed + 1, updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Top users by total points, for the leaderboard.
    pub async fn top_by_points(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT user_id, total_points, current_streak, achievements_unlocked \
             FROM user_stats \
             ORDER BY total_points DESC, user_id \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
