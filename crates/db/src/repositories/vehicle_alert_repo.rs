//! Repository for the `vehicle_alerts` watches.

use motormate_core::types::{DbId, Timestamp, UserId};
use sqlx::PgPool;

use crate::models::alert::VehicleAlert;

/// Column list for `vehicle_alerts` queries.
const COLUMNS: &str = "id, user_id, vehicle_id, alert_type, threshold_value, is_active, \
    last_triggered, created_at";

/// Optional narrowing for a dispatch run.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub vehicle_id: Option<DbId>,
    pub alert_type: Option<String>,
}

/// Reads and updates vehicle watches. `last_triggered` and deactivation of
/// one-shot watches are dispatcher writes; user-facing code only flips
/// `is_active` off.
pub struct VehicleAlertRepo;

impl VehicleAlertRepo {
    /// All active watches, optionally narrowed to one vehicle and/or type.
    pub async fn list_active(
        pool: &PgPool,
        filter: &AlertFilter,
    ) -> Result<Vec<VehicleAlert>, sqlx::Error> {
        let mut conditions = vec!["is_active = true".to_string()];
        if filter.vehicle_id.is_some() {
            conditions.push("vehicle_id = $1".to_string());
        }
        if filter.alert_type.is_some() {
            conditions.push(format!(
                "alert_type = ${}",
                if filter.vehicle_id.is_some() { 2 } else { 1 }
            ));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_alerts WHERE {} ORDER BY id",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, VehicleAlert>(&query);
        if let Some(vehicle_id) = filter.vehicle_id {
            q = q.bind(vehicle_id);
        }
        if let Some(alert_type) = &filter.alert_type {
            q = q.bind(alert_type);
        }
        q.fetch_all(pool).await
    }

    /// Record a trigger: stamp `last_triggered`, and deactivate one-shot
    /// watches so frozen conditions never re-notify.
    pub async fn mark_triggered(
        pool: &PgPool,
        alert_id: DbId,
        now: Timestamp,
        deactivate: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE vehicle_alerts \
             SET last_triggered = $2, is_active = is_active AND NOT $3 \
             WHERE id = $1",
        )
        .bind(alert_id)
        .bind(now)
        .bind(deactivate)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Active watches for a user (the watch-list screen).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<VehicleAlert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_alerts \
             WHERE user_id = $1 AND is_active = true \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, VehicleAlert>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
