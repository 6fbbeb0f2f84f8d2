//! Repository for the vehicle catalog snapshot.

use motormate_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{CatalogVehicle, VehicleVariant};

/// Column list for `vehicles_catalog` queries.
const VEHICLE_COLUMNS: &str = "id, brand, model, status, launch_date, created_at";

/// Column list for `vehicle_variants` queries.
const VARIANT_COLUMNS: &str =
    "id, vehicle_id, variant_name, price_range_min, price_range_max, created_at";

/// Read-only access to catalog vehicles and their variants.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Fetch a single catalog vehicle.
    pub async fn find_vehicle(
        pool: &PgPool,
        vehicle_id: DbId,
    ) -> Result<Option<CatalogVehicle>, sqlx::Error> {
        let query = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles_catalog WHERE id = $1");
        sqlx::query_as::<_, CatalogVehicle>(&query)
            .bind(vehicle_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the catalog vehicles for a set of ids (one round trip for a
    /// whole dispatch batch).
    pub async fn vehicles_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<CatalogVehicle>, sqlx::Error> {
        let query = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles_catalog WHERE id = ANY($1)");
        sqlx::query_as::<_, CatalogVehicle>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Fetch all variants belonging to a set of vehicles.
    pub async fn variants_by_vehicle_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<VehicleVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {VARIANT_COLUMNS} FROM vehicle_variants \
             WHERE vehicle_id = ANY($1) \
             ORDER BY vehicle_id, id"
        );
        sqlx::query_as::<_, VehicleVariant>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
