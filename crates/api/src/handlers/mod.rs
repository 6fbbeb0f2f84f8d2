//! HTTP handler functions, grouped by resource.

pub mod achievements;
pub mod alerts;
pub mod notifications;
pub mod points;
pub mod referrals;
pub mod rewards;
pub mod stats;
pub mod streak;
