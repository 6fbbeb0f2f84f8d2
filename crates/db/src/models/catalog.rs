//! Vehicle catalog snapshot models.

use chrono::NaiveDate;
use motormate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vehicles_catalog` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogVehicle {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub status: String,
    pub launch_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

/// A row from the `vehicle_variants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleVariant {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub variant_name: String,
    pub price_range_min: i64,
    pub price_range_max: i64,
    pub created_at: Timestamp,
}
