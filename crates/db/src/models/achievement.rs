//! Achievement unlock record model.

use motormate_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `achievements` table: one unlock per (user, catalog id),
/// with the catalog values copied at unlock time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub user_id: UserId,
    pub achievement_id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub points_awarded: i32,
    pub unlocked_at: Timestamp,
}
