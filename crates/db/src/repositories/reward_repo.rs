//! Repository for the reward catalog and redemptions.

use motormate_core::points::ActionType;
use motormate_core::types::{DbId, UserId};
use serde_json::json;
use sqlx::PgPool;

use crate::models::reward::{RewardCatalogEntry, RewardRedemption};
use crate::repositories::{RewardEventRepo, UserStatsRepo};

/// Column list for `reward_catalog` queries.
const CATALOG_COLUMNS: &str = "id, name, description, reward_type, value, points_required, \
    max_redemptions_per_user, metadata, is_active";

/// Column list for `reward_redemptions` queries.
const REDEMPTION_COLUMNS: &str =
    "id, user_id, reward_id, points_spent, redemption_data, redeemed_at";

/// Catalog reads and the redemption transaction.
pub struct RewardRepo;

impl RewardRepo {
    /// Active catalog entries, cheapest first.
    pub async fn list_catalog(pool: &PgPool) -> Result<Vec<RewardCatalogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {CATALOG_COLUMNS} FROM reward_catalog \
             WHERE is_active = true \
             ORDER BY points_required, id"
        );
        sqlx::query_as::<_, RewardCatalogEntry>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch one catalog entry.
    pub async fn find_catalog_entry(
        pool: &PgPool,
        reward_id: DbId,
    ) -> Result<Option<RewardCatalogEntry>, sqlx::Error> {
        let query = format!("SELECT {CATALOG_COLUMNS} FROM reward_catalog WHERE id = $1");
        sqlx::query_as::<_, RewardCatalogEntry>(&query)
            .bind(reward_id)
            .fetch_optional(pool)
            .await
    }

    /// How many times the user has redeemed this reward.
    pub async fn redemption_count(
        pool: &PgPool,
        user_id: UserId,
        reward_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reward_redemptions WHERE user_id = $1 AND reward_id = $2",
        )
        .bind(user_id)
        .bind(reward_id)
        .fetch_one(pool)
        .await
    }

    /// Redeem a reward: record the redemption, debit the points through the
    /// ledger, and bump `rewards_redeemed`, all in one transaction.
    ///
    /// Returns the redemption record and the user's new balance. Balance
    /// and per-user redemption limits are pre-checked by the caller.
    pub async fn redeem(
        pool: &PgPool,
        user_id: UserId,
        entry: &RewardCatalogEntry,
        redemption_data: &serde_json::Value,
    ) -> Result<(RewardRedemption, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO reward_redemptions (user_id, reward_id, points_spent, redemption_data) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {REDEMPTION_COLUMNS}"
        );
        let redemption = sqlx::query_as::<_, RewardRedemption>(&insert_query)
            .bind(user_id)
            .bind(entry.id)
            .bind(entry.points_required)
            .bind(redemption_data)
            .fetch_one(&mut *tx)
            .await?;

        let metadata = json!({
            "reward_id": entry.id,
            "redemption_id": redemption.id,
        });
        let (_, new_total) = RewardEventRepo::record(
            &mut tx,
            user_id,
            -entry.points_required,
            ActionType::RewardRedeemed.as_str(),
            &metadata,
        )
        .await?;

        UserStatsRepo::increment_rewards_redeemed(&mut tx, user_id).await?;

        tx.commit().await?;
        Ok((redemption, new_total))
    }
}
