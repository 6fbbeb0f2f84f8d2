//! Referral models.

use motormate_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_referrals` table (one code per user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserReferral {
    pub id: DbId,
    pub user_id: UserId,
    pub referral_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `referral_uses` table (one use per referee, ever).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferralUse {
    pub id: DbId,
    pub referrer_id: UserId,
    pub referee_id: UserId,
    pub referral_code: String,
    pub created_at: Timestamp,
}
