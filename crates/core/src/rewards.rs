//! Redeemable reward types and redemption payload construction.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::referral::random_code_suffix;

/// Default premium feature duration when the catalog entry doesn't set one.
pub const DEFAULT_PREMIUM_DURATION_DAYS: i64 = 30;

/// What a catalog reward grants when redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Discount,
    Cashback,
    FreeService,
    PremiumFeature,
}

impl RewardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discount => "discount",
            Self::Cashback => "cashback",
            Self::FreeService => "free_service",
            Self::PremiumFeature => "premium_feature",
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discount" => Ok(Self::Discount),
            "cashback" => Ok(Self::Cashback),
            "free_service" => Ok(Self::FreeService),
            "premium_feature" => Ok(Self::PremiumFeature),
            other => Err(CoreError::Validation(format!(
                "unknown reward type: {other}"
            ))),
        }
    }
}

/// Build the `redemption_data` payload stored on the redemption record and
/// returned to the client.
///
/// `value` and `metadata` come from the catalog row. Discount codes embed a
/// random suffix so each redemption yields a distinct code.
pub fn redemption_payload(
    kind: RewardKind,
    value: i32,
    metadata: &serde_json::Value,
) -> serde_json::Value {
    match kind {
        RewardKind::Discount => {
            let code = format!("DISCOUNT_{}", random_code_suffix(9));
            json!({
                "type": "discount_code",
                "code": code,
                "value": value,
                "description": format!("{value}% discount on next booking"),
            })
        }
        RewardKind::Cashback => json!({
            "type": "cashback",
            "amount": value,
            "description": format!("₹{value} cashback credited to wallet"),
        }),
        RewardKind::FreeService => {
            let service = metadata
                .get("service_type")
                .and_then(|v| v.as_str())
                .unwrap_or("parking");
            json!({
                "type": "free_service",
                "service": service,
                "description": "Free service booking unlocked",
            })
        }
        RewardKind::PremiumFeature => {
            let feature = metadata
                .get("feature_name")
                .and_then(|v| v.as_str())
                .unwrap_or("premium");
            let duration = metadata
                .get("duration_days")
                .and_then(|v| v.as_i64())
                .unwrap_or(DEFAULT_PREMIUM_DURATION_DAYS);
            json!({
                "type": "premium_feature",
                "feature": feature,
                "duration_days": duration,
                "description": format!("Premium feature unlocked for {duration} days"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_payload_carries_a_unique_code() {
        let a = redemption_payload(RewardKind::Discount, 15, &json!({}));
        let b = redemption_payload(RewardKind::Discount, 15, &json!({}));
        assert_eq!(a["type"], "discount_code");
        assert_eq!(a["value"], 15);
        let code_a = a["code"].as_str().unwrap();
        let code_b = b["code"].as_str().unwrap();
        assert!(code_a.starts_with("DISCOUNT_"));
        assert_ne!(code_a, code_b);
    }

    #[test]
    fn cashback_payload_carries_amount() {
        let p = redemption_payload(RewardKind::Cashback, 200, &json!({}));
        assert_eq!(p["type"], "cashback");
        assert_eq!(p["amount"], 200);
    }

    #[test]
    fn free_service_defaults_to_parking() {
        let p = redemption_payload(RewardKind::FreeService, 1, &json!({}));
        assert_eq!(p["service"], "parking");

        let p = redemption_payload(
            RewardKind::FreeService,
            1,
            &json!({ "service_type": "car_wash" }),
        );
        assert_eq!(p["service"], "car_wash");
    }

    #[test]
    fn premium_feature_reads_metadata_with_defaults() {
        let p = redemption_payload(RewardKind::PremiumFeature, 1, &json!({}));
        assert_eq!(p["feature"], "premium");
        assert_eq!(p["duration_days"], 30);

        let p = redemption_payload(
            RewardKind::PremiumFeature,
            1,
            &json!({ "feature_name": "sos_plus", "duration_days": 90 }),
        );
        assert_eq!(p["feature"], "sos_plus");
        assert_eq!(p["duration_days"], 90);
    }

    #[test]
    fn reward_kind_round_trips() {
        for kind in [
            RewardKind::Discount,
            RewardKind::Cashback,
            RewardKind::FreeService,
            RewardKind::PremiumFeature,
        ] {
            assert_eq!(kind.as_str().parse::<RewardKind>().unwrap(), kind);
        }
        assert!("gold_bar".parse::<RewardKind>().is_err());
    }
}
