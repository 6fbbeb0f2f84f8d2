//! Per-user engagement stats models.

use motormate_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_stats` table.
///
/// `total_points` is the denormalized sum of the user's ledger; every
/// writer maintains it in the same transaction as the ledger row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStats {
    pub id: DbId,
    pub user_id: UserId,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Timestamp>,
    pub total_points: i64,
    pub achievements_unlocked: i32,
    pub rewards_redeemed: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A leaderboard row: stats trimmed to what the ranking screen shows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub total_points: i64,
    pub current_streak: i32,
    pub achievements_unlocked: i32,
}
