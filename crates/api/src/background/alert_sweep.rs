//! Periodic in-process run of the alert dispatcher.
//!
//! Spawns from `main` and evaluates every active watch on a fixed
//! interval using `tokio::time::interval`. Runs until cancelled.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use motormate_worker::alerts::{self, DispatchFilter};

/// Run the alert sweep loop.
pub async fn run(pool: PgPool, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Alert sweep job started");

    let mut interval = tokio::time::interval(period);
    let filter = DispatchFilter {
        check_all: true,
        ..Default::default()
    };

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Alert sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match alerts::run_once(&pool, &filter).await {
                    Ok(summary) if summary.triggered_alerts > 0 => {
                        tracing::info!(
                            triggered = summary.triggered_alerts,
                            sent = summary.notifications_sent,
                            "Alert sweep: triggered watches"
                        );
                    }
                    Ok(_) => {
                        tracing::debug!("Alert sweep: nothing to trigger");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Alert sweep failed");
                    }
                }
            }
        }
    }
}
