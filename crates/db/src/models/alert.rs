//! Vehicle watch (alert) model.

use motormate_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vehicle_alerts` table.
///
/// `last_triggered` is written by the dispatcher only; users deactivate
/// watches rather than delete them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleAlert {
    pub id: DbId,
    pub user_id: UserId,
    pub vehicle_id: DbId,
    pub alert_type: String,
    pub threshold_value: Option<i64>,
    pub is_active: bool,
    pub last_triggered: Option<Timestamp>,
    pub created_at: Timestamp,
}
