//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Any DTOs the repositories or handlers need for inserts

pub mod achievement;
pub mod alert;
pub mod catalog;
pub mod garage;
pub mod notification;
pub mod referral;
pub mod reward;
pub mod stats;
