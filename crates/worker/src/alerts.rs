//! The vehicle alert dispatcher sweep.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::json;

use motormate_core::alerts::{self, AlertType, VariantSnapshot, VehicleSnapshot, WatchState};
use motormate_core::types::DbId;
use motormate_db::models::notification::NewNotification;
use motormate_db::repositories::vehicle_alert_repo::AlertFilter;
use motormate_db::repositories::{CatalogRepo, NotificationRepo, VehicleAlertRepo};
use motormate_db::DbPool;

/// Narrowing options for one dispatch run. `check_all` overrides the
/// per-vehicle / per-type filters.
#[derive(Debug, Clone, Default)]
pub struct DispatchFilter {
    pub vehicle_id: Option<DbId>,
    pub alert_type: Option<AlertType>,
    pub check_all: bool,
}

/// What a dispatch run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub alerts_checked: u64,
    pub triggered_alerts: u64,
    pub notifications_sent: u64,
}

/// Run one dispatch pass over the active watches.
///
/// Loading failures abort the run; per-watch write failures are logged and
/// skipped (the next scheduled pass retries). Watches whose trigger fires
/// get `last_triggered` stamped (and one-shot watches deactivated) before
/// their notification is inserted, so a notification insert failure cannot
/// re-fire a one-shot watch forever.
pub async fn run_once(
    pool: &DbPool,
    filter: &DispatchFilter,
) -> Result<DispatchSummary, sqlx::Error> {
    let repo_filter = if filter.check_all {
        AlertFilter::default()
    } else {
        AlertFilter {
            vehicle_id: filter.vehicle_id,
            alert_type: filter.alert_type.map(|t| t.as_str().to_string()),
        }
    };

    let watches = VehicleAlertRepo::list_active(pool, &repo_filter).await?;
    let alerts_checked = watches.len() as u64;
    if watches.is_empty() {
        return Ok(DispatchSummary {
            alerts_checked: 0,
            triggered_alerts: 0,
            notifications_sent: 0,
        });
    }

    let vehicles = load_vehicle_snapshots(pool, &watches).await?;

    let now = Utc::now();
    let mut triggered = 0;
    let mut notifications = Vec::new();

    for watch in &watches {
        let alert_type: AlertType = match watch.alert_type.parse() {
            Ok(t) => t,
            Err(_) => {
                tracing::warn!(alert_id = watch.id, alert_type = %watch.alert_type,
                    "Skipping watch with unknown alert type");
                continue;
            }
        };
        let Some(vehicle) = vehicles.get(&watch.vehicle_id) else {
            tracing::warn!(alert_id = watch.id, vehicle_id = watch.vehicle_id,
                "Skipping watch for missing catalog vehicle");
            continue;
        };

        let state = WatchState {
            alert_type,
            threshold_value: watch.threshold_value,
            last_triggered: watch.last_triggered,
        };
        let Some(trigger) = alerts::evaluate(&state, vehicle, now) else {
            continue;
        };

        if let Err(e) =
            VehicleAlertRepo::mark_triggered(pool, watch.id, now, trigger.deactivate).await
        {
            tracing::error!(alert_id = watch.id, error = %e,
                "Failed to record alert trigger, skipping");
            continue;
        }
        triggered += 1;

        notifications.push(NewNotification {
            user_id: watch.user_id,
            kind: "vehicle_alert".to_string(),
            title: format!("{} {} Alert", vehicle.brand, vehicle.model),
            message: trigger.reason,
            data: json!({
                "vehicle_id": watch.vehicle_id,
                "alert_id": watch.id,
                "alert_type": alert_type.as_str(),
            }),
        });
    }

    let notifications_sent = NotificationRepo::create_batch(pool, &notifications).await;

    tracing::info!(
        alerts_checked,
        triggered_alerts = triggered,
        notifications_sent,
        "Alert dispatch pass complete"
    );

    Ok(DispatchSummary {
        alerts_checked,
        triggered_alerts: triggered,
        notifications_sent,
    })
}

/// Fetch the catalog vehicles + variants referenced by a batch of watches,
/// keyed by vehicle id.
async fn load_vehicle_snapshots(
    pool: &DbPool,
    watches: &[motormate_db::models::alert::VehicleAlert],
) -> Result<HashMap<DbId, VehicleSnapshot>, sqlx::Error> {
    let mut ids: Vec<DbId> = watches.iter().map(|w| w.vehicle_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let vehicles = CatalogRepo::vehicles_by_ids(pool, &ids).await?;
    let variants = CatalogRepo::variants_by_vehicle_ids(pool, &ids).await?;

    let mut snapshots: HashMap<DbId, VehicleSnapshot> = vehicles
        .into_iter()
        .map(|v| {
            (
                v.id,
                VehicleSnapshot {
                    brand: v.brand,
                    model: v.model,
                    status: v.status,
                    launch_date: v.launch_date,
                    variants: Vec::new(),
                },
            )
        })
        .collect();

    for variant in variants {
        if let Some(snapshot) = snapshots.get_mut(&variant.vehicle_id) {
            snapshot.variants.push(VariantSnapshot {
                price_range_min: variant.price_range_min,
                created_at: variant.created_at,
            });
        }
    }

    Ok(snapshots)
}
