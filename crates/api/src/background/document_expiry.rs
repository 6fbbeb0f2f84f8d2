//! Periodic in-process run of the document expiry scan.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use motormate_worker::expiry;

/// Run the document expiry loop.
pub async fn run(pool: PgPool, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Document expiry job started");

    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Document expiry job stopping");
                break;
            }
            _ = interval.tick() => {
                match expiry::run_once(&pool).await {
                    Ok(summary) if summary.notifications_sent > 0 => {
                        tracing::info!(
                            sent = summary.notifications_sent,
                            "Document expiry: reminders sent"
                        );
                    }
                    Ok(_) => {
                        tracing::debug!("Document expiry: nothing in window");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Document expiry scan failed");
                    }
                }
            }
        }
    }
}
