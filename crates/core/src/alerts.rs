//! Trigger rules for vehicle catalog watches.
//!
//! The dispatcher loads active watches plus a catalog snapshot and asks
//! this module whether each one fires. `launch_date` and `discontinued`
//! describe frozen conditions, so they are one-shot: once fired the watch
//! is deactivated, otherwise every subsequent sweep would re-notify.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Catalog status value that marks a vehicle as discontinued.
pub const VEHICLE_STATUS_DISCONTINUED: &str = "discontinued";

/// What a watch is watching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    PriceDrop,
    NewVariant,
    LaunchDate,
    Discontinued,
}

impl AlertType {
    /// Canonical snake_case form, as stored on the watch row.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceDrop => "price_drop",
            Self::NewVariant => "new_variant",
            Self::LaunchDate => "launch_date",
            Self::Discontinued => "discontinued",
        }
    }

    /// Whether the watched condition is frozen once true. One-shot watches
    /// are deactivated after their first trigger.
    pub fn is_one_shot(self) -> bool {
        matches!(self, Self::LaunchDate | Self::Discontinued)
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_drop" => Ok(Self::PriceDrop),
            "new_variant" => Ok(Self::NewVariant),
            "launch_date" => Ok(Self::LaunchDate),
            "discontinued" => Ok(Self::Discontinued),
            other => Err(CoreError::Validation(format!("unknown alert type: {other}"))),
        }
    }
}

/// The watch state the trigger rules need.
#[derive(Debug, Clone, Copy)]
pub struct WatchState {
    pub alert_type: AlertType,
    pub threshold_value: Option<i64>,
    pub last_triggered: Option<Timestamp>,
}

/// A catalog variant, reduced to what the rules read.
#[derive(Debug, Clone)]
pub struct VariantSnapshot {
    pub price_range_min: i64,
    pub created_at: Timestamp,
}

/// A catalog vehicle plus its current variants.
#[derive(Debug, Clone)]
pub struct VehicleSnapshot {
    pub brand: String,
    pub model: String,
    pub status: String,
    pub launch_date: Option<chrono::NaiveDate>,
    pub variants: Vec<VariantSnapshot>,
}

/// A fired watch: the notification text and whether the watch is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub reason: String,
    pub deactivate: bool,
}

/// Decide whether `watch` fires against `vehicle` at `now`.
///
/// - `price_drop`: the cheapest current variant is at or below the
///   threshold. Watches with no threshold or no variants never fire.
/// - `new_variant`: at least one variant was created strictly after
///   `last_triggered`. A watch that has never triggered has no baseline
///   and does not fire (carried over from the existing system as-is).
/// - `launch_date`: the launch date has arrived. One-shot.
/// - `discontinued`: the catalog marks the vehicle discontinued. One-shot.
pub fn evaluate(watch: &WatchState, vehicle: &VehicleSnapshot, now: Timestamp) -> Option<Trigger> {
    match watch.alert_type {
        AlertType::PriceDrop => {
            let threshold = watch.threshold_value?;
            let current_min = vehicle.variants.iter().map(|v| v.price_range_min).min()?;
            (current_min <= threshold).then(|| Trigger {
                reason: format!("Price dropped to ₹{current_min} (below ₹{threshold})"),
                deactivate: false,
            })
        }
        AlertType::NewVariant => {
            let since = watch.last_triggered?;
            let fresh = vehicle
                .variants
                .iter()
                .filter(|v| v.created_at > since)
                .count();
            (fresh > 0).then(|| Trigger {
                reason: format!("{fresh} new variant(s) added"),
                deactivate: false,
            })
        }
        AlertType::LaunchDate => {
            let launch = vehicle.launch_date?;
            (launch <= now.date_naive()).then(|| Trigger {
                reason: format!("Vehicle launched on {launch}"),
                deactivate: true,
            })
        }
        AlertType::Discontinued => (vehicle.status == VEHICLE_STATUS_DISCONTINUED).then(|| {
            Trigger {
                reason: "Vehicle has been discontinued".to_string(),
                deactivate: true,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> Timestamp {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn vehicle(variants: Vec<VariantSnapshot>) -> VehicleSnapshot {
        VehicleSnapshot {
            brand: "Tata".into(),
            model: "Nexon".into(),
            status: "active".into(),
            launch_date: None,
            variants,
        }
    }

    fn variant(price: i64, created: &str) -> VariantSnapshot {
        VariantSnapshot {
            price_range_min: price,
            created_at: at(created),
        }
    }

    fn watch(alert_type: AlertType) -> WatchState {
        WatchState {
            alert_type,
            threshold_value: None,
            last_triggered: None,
        }
    }

    // -- price_drop --

    #[test]
    fn price_drop_does_not_fire_above_threshold() {
        let w = WatchState {
            threshold_value: Some(1_000_000),
            ..watch(AlertType::PriceDrop)
        };
        let v = vehicle(vec![variant(1_100_000, "2026-01-01 00:00:00")]);
        assert!(evaluate(&w, &v, at("2026-08-07 10:00:00")).is_none());
    }

    #[test]
    fn price_drop_fires_at_or_below_threshold() {
        let w = WatchState {
            threshold_value: Some(1_000_000),
            ..watch(AlertType::PriceDrop)
        };
        let v = vehicle(vec![
            variant(1_100_000, "2026-01-01 00:00:00"),
            variant(950_000, "2026-06-01 00:00:00"),
        ]);
        let trigger = evaluate(&w, &v, at("2026-08-07 10:00:00")).unwrap();
        assert!(trigger.reason.contains("950000"));
        assert!(!trigger.deactivate);
    }

    #[test]
    fn price_drop_uses_cheapest_variant() {
        let w = WatchState {
            threshold_value: Some(900_000),
            ..watch(AlertType::PriceDrop)
        };
        let v = vehicle(vec![
            variant(900_000, "2026-01-01 00:00:00"),
            variant(1_500_000, "2026-01-01 00:00:00"),
        ]);
        assert!(evaluate(&w, &v, at("2026-08-07 10:00:00")).is_some());
    }

    #[test]
    fn price_drop_without_threshold_or_variants_never_fires() {
        let no_threshold = watch(AlertType::PriceDrop);
        let v = vehicle(vec![variant(1, "2026-01-01 00:00:00")]);
        assert!(evaluate(&no_threshold, &v, at("2026-08-07 10:00:00")).is_none());

        let w = WatchState {
            threshold_value: Some(1_000_000),
            ..watch(AlertType::PriceDrop)
        };
        assert!(evaluate(&w, &vehicle(vec![]), at("2026-08-07 10:00:00")).is_none());
    }

    // -- new_variant --

    #[test]
    fn new_variant_fires_on_variants_after_baseline() {
        let w = WatchState {
            last_triggered: Some(at("2026-05-01 00:00:00")),
            ..watch(AlertType::NewVariant)
        };
        let v = vehicle(vec![
            variant(1_000_000, "2026-01-01 00:00:00"),
            variant(1_200_000, "2026-06-01 00:00:00"),
        ]);
        let trigger = evaluate(&w, &v, at("2026-08-07 10:00:00")).unwrap();
        assert_eq!(trigger.reason, "1 new variant(s) added");
    }

    #[test]
    fn new_variant_without_baseline_never_fires() {
        let v = vehicle(vec![variant(1_000_000, "2026-06-01 00:00:00")]);
        assert!(evaluate(&watch(AlertType::NewVariant), &v, at("2026-08-07 10:00:00")).is_none());
    }

    #[test]
    fn new_variant_ignores_variants_at_or_before_baseline() {
        let w = WatchState {
            last_triggered: Some(at("2026-06-01 00:00:00")),
            ..watch(AlertType::NewVariant)
        };
        let v = vehicle(vec![variant(1_000_000, "2026-06-01 00:00:00")]);
        assert!(evaluate(&w, &v, at("2026-08-07 10:00:00")).is_none());
    }

    // -- launch_date --

    #[test]
    fn launch_date_fires_once_date_arrives_and_deactivates() {
        let mut v = vehicle(vec![]);
        v.launch_date = Some("2026-08-01".parse().unwrap());
        let trigger = evaluate(&watch(AlertType::LaunchDate), &v, at("2026-08-07 10:00:00"))
            .unwrap();
        assert!(trigger.deactivate);
    }

    #[test]
    fn launch_date_in_future_does_not_fire() {
        let mut v = vehicle(vec![]);
        v.launch_date = Some("2026-09-01".parse().unwrap());
        assert!(evaluate(&watch(AlertType::LaunchDate), &v, at("2026-08-07 10:00:00")).is_none());
    }

    // -- discontinued --

    #[test]
    fn discontinued_fires_and_deactivates() {
        let mut v = vehicle(vec![]);
        v.status = VEHICLE_STATUS_DISCONTINUED.to_string();
        let trigger = evaluate(&watch(AlertType::Discontinued), &v, at("2026-08-07 10:00:00"))
            .unwrap();
        assert!(trigger.deactivate);
    }

    #[test]
    fn active_vehicle_does_not_fire_discontinued() {
        let v = vehicle(vec![]);
        assert!(evaluate(&watch(AlertType::Discontinued), &v, at("2026-08-07 10:00:00")).is_none());
    }

    // -- parsing --

    #[test]
    fn alert_type_round_trips() {
        for t in [
            AlertType::PriceDrop,
            AlertType::NewVariant,
            AlertType::LaunchDate,
            AlertType::Discontinued,
        ] {
            assert_eq!(t.as_str().parse::<AlertType>().unwrap(), t);
        }
        assert!("price_hike".parse::<AlertType>().is_err());
    }

    #[test]
    fn one_shot_covers_frozen_conditions_only() {
        assert!(AlertType::LaunchDate.is_one_shot());
        assert!(AlertType::Discontinued.is_one_shot());
        assert!(!AlertType::PriceDrop.is_one_shot());
        assert!(!AlertType::NewVariant.is_one_shot());
    }
}
