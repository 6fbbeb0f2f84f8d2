//! Repository over the garage-side tables (`vehicles`, `documents`,
//! `bookings`, `family_groups`) for predicate counts and the expiry sweep.

use chrono::NaiveDate;
use motormate_core::achievements::UserSnapshot;
use motormate_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::garage::ExpiringDocument;

/// Counts and scans over a user's garage data.
pub struct GarageRepo;

impl GarageRepo {
    /// Assemble the live counts the achievement predicates read.
    ///
    /// Streak and points come from `user_stats` (zero before first
    /// activity); the rest are row counts.
    pub async fn snapshot(pool: &PgPool, user_id: UserId) -> Result<UserSnapshot, sqlx::Error> {
        let vehicle_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        let document_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        let parking_booking_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE user_id = $1 AND booking_type = 'parking'",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        let family_groups_owned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM family_groups WHERE owner_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        let stats: Option<(i32, i64)> = sqlx::query_as(
            "SELECT current_streak, total_points FROM user_stats WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        let (current_streak, total_points) = stats.unwrap_or((0, 0));

        Ok(UserSnapshot {
            vehicle_count,
            document_count,
            parking_booking_count,
            current_streak,
            family_groups_owned,
            total_points,
        })
    }

    /// Documents expiring on or before `cutoff` that have not yet been
    /// reminded, joined with their vehicle for the notification text.
    pub async fn expiring_documents(
        pool: &PgPool,
        cutoff: NaiveDate,
    ) -> Result<Vec<ExpiringDocument>, sqlx::Error> {
        sqlx::query_as::<_, ExpiringDocument>(
            "SELECT d.id, d.user_id, d.document_type, d.expiry_date, \
                    v.make, v.model, v.registration_number \
             FROM documents d \
             JOIN vehicles v ON v.id = d.vehicle_id \
             WHERE d.expiry_date IS NOT NULL \
               AND d.expiry_date <= $1 \
               AND d.reminder_sent = false \
             ORDER BY d.expiry_date",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Flip `reminder_sent` for the given documents so the next sweep
    /// skips them.
    pub async fn mark_reminded(pool: &PgPool, document_ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE documents SET reminder_sent = true WHERE id = ANY($1)")
            .bind(document_ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
