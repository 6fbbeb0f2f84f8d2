//! Points ledger and redeemable reward models.

use motormate_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `reward_events` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RewardEvent {
    pub id: DbId,
    pub user_id: UserId,
    pub points_awarded: i32,
    pub action_type: String,
    pub metadata: serde_json::Value,
    pub earned_at: Timestamp,
}

/// A row from the `reward_catalog` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RewardCatalogEntry {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub reward_type: String,
    pub value: i32,
    pub points_required: i32,
    pub max_redemptions_per_user: Option<i32>,
    pub metadata: serde_json::Value,
    pub is_active: bool,
}

/// A row from the `reward_redemptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RewardRedemption {
    pub id: DbId,
    pub user_id: UserId,
    pub reward_id: DbId,
    pub points_spent: i32,
    pub redemption_data: serde_json::Value,
    pub redeemed_at: Timestamp,
}
