//! Garage-side models consumed by predicates and the expiry sweep.

use chrono::NaiveDate;
use motormate_core::types::{DbId, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A document inside the reminder window, joined with its vehicle.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExpiringDocument {
    pub id: DbId,
    pub user_id: UserId,
    pub document_type: String,
    pub expiry_date: NaiveDate,
    pub make: String,
    pub model: String,
    pub registration_number: String,
}
