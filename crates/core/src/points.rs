//! Point values and the ledger action taxonomy.
//!
//! Every point movement is a row in the append-only `reward_events` ledger,
//! tagged with one of these action types. The fixed per-action values match
//! what the client surfaces ("Add Vehicle +50").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Points paid for adding a vehicle to the garage.
pub const VEHICLE_ADDED_POINTS: i32 = 50;
/// Points paid for uploading a vehicle document.
pub const DOCUMENT_UPLOADED_POINTS: i32 = 25;
/// Points paid for making a booking.
pub const BOOKING_MADE_POINTS: i32 = 30;

/// Why a ledger row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    VehicleAdded,
    DocumentUploaded,
    BookingMade,
    AchievementUnlocked,
    StreakBonus,
    SuccessfulReferral,
    ReferralBonus,
    RewardRedeemed,
}

impl ActionType {
    /// Canonical snake_case form, as stored in the ledger.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VehicleAdded => "vehicle_added",
            Self::DocumentUploaded => "document_uploaded",
            Self::BookingMade => "booking_made",
            Self::AchievementUnlocked => "achievement_unlocked",
            Self::StreakBonus => "streak_bonus",
            Self::SuccessfulReferral => "successful_referral",
            Self::ReferralBonus => "referral_bonus",
            Self::RewardRedeemed => "reward_redeemed",
        }
    }

    /// The standard award for user-initiated actions, where one exists.
    /// Achievement, streak, referral and redemption amounts are decided by
    /// their own components.
    pub fn standard_points(self) -> Option<i32> {
        match self {
            Self::VehicleAdded => Some(VEHICLE_ADDED_POINTS),
            Self::DocumentUploaded => Some(DOCUMENT_UPLOADED_POINTS),
            Self::BookingMade => Some(BOOKING_MADE_POINTS),
            _ => None,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vehicle_added" => Ok(Self::VehicleAdded),
            "document_uploaded" => Ok(Self::DocumentUploaded),
            "booking_made" => Ok(Self::BookingMade),
            "achievement_unlocked" => Ok(Self::AchievementUnlocked),
            "streak_bonus" => Ok(Self::StreakBonus),
            "successful_referral" => Ok(Self::SuccessfulReferral),
            "referral_bonus" => Ok(Self::ReferralBonus),
            "reward_redeemed" => Ok(Self::RewardRedeemed),
            other => Err(CoreError::Validation(format!(
                "unknown action type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for action in [
            ActionType::VehicleAdded,
            ActionType::DocumentUploaded,
            ActionType::BookingMade,
            ActionType::AchievementUnlocked,
            ActionType::StreakBonus,
            ActionType::SuccessfulReferral,
            ActionType::ReferralBonus,
            ActionType::RewardRedeemed,
        ] {
            assert_eq!(action.as_str().parse::<ActionType>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_action_is_a_validation_error() {
        let err = "points_for_nothing".parse::<ActionType>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn standard_points_cover_user_actions_only() {
        assert_eq!(ActionType::VehicleAdded.standard_points(), Some(50));
        assert_eq!(ActionType::DocumentUploaded.standard_points(), Some(25));
        assert_eq!(ActionType::BookingMade.standard_points(), Some(30));
        assert_eq!(ActionType::StreakBonus.standard_points(), None);
        assert_eq!(ActionType::RewardRedeemed.standard_points(), None);
    }
}
