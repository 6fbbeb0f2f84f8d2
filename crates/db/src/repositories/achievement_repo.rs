//! Repository for the `achievements` unlock records.

use motormate_core::achievements::AchievementDef;
use motormate_core::points::ActionType;
use motormate_core::types::UserId;
use serde_json::json;
use sqlx::PgPool;

use crate::models::achievement::Achievement;
use crate::repositories::RewardEventRepo;

/// Column list for `achievements` queries.
const COLUMNS: &str =
    "id, user_id, achievement_id, name, description, icon, points_awarded, unlocked_at";

/// Creates and reads achievement unlocks.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Catalog ids the user has already unlocked.
    pub async fn unlocked_ids(pool: &PgPool, user_id: UserId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT achievement_id FROM achievements WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All unlocks for a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements \
             WHERE user_id = $1 \
             ORDER BY unlocked_at DESC"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Unlock a catalog entry for a user, at most once.
    ///
    /// The unique constraint on `(user_id, achievement_id)` is the source
    /// of truth: the insert uses `ON CONFLICT DO NOTHING RETURNING`, so a
    /// concurrent evaluator that loses the race observes no returned row
    /// and awards nothing. On a fresh unlock, the points award and the
    /// `achievements_unlocked` bump join the same transaction.
    ///
    /// Returns `None` when the achievement was already unlocked.
    pub async fn unlock(
        pool: &PgPool,
        user_id: UserId,
        def: &AchievementDef,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO achievements \
                (user_id, achievement_id, name, description, icon, points_awarded) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, achievement_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let unlocked = sqlx::query_as::<_, Achievement>(&insert_query)
            .bind(user_id)
            .bind(def.id)
            .bind(def.name)
            .bind(def.description)
            .bind(def.icon)
            .bind(def.points)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(achievement) = unlocked else {
            tx.commit().await?;
            return Ok(None);
        };

        let metadata = json!({ "achievement_id": def.id });
        RewardEventRepo::record(
            &mut tx,
            user_id,
            def.points,
            ActionType::AchievementUnlocked.as_str(),
            &metadata,
        )
        .await?;

        sqlx::query(
            "UPDATE user_stats \
             SET achievements_unlocked = achievements_unlocked + 1, updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(achievement))
    }
}
