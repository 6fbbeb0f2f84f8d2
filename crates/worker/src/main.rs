//! Standalone sweep scheduler.
//!
//! Runs the alert dispatcher and the document expiry scan on fixed
//! intervals against the shared database. The API server runs the same
//! sweeps in-process; deployments pick one or the other.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use motormate_worker::alerts::DispatchFilter;
use motormate_worker::{alerts, expiry};

/// How often the alert dispatcher sweeps, in seconds.
const DEFAULT_ALERT_INTERVAL_SECS: u64 = 3600;

/// How often the document expiry scan runs, in seconds.
const DEFAULT_EXPIRY_INTERVAL_SECS: u64 = 21600;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "motormate_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = motormate_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    motormate_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Worker connected to database");

    let alert_interval = env_secs("ALERT_SWEEP_INTERVAL_SECS", DEFAULT_ALERT_INTERVAL_SECS);
    let expiry_interval = env_secs("EXPIRY_SWEEP_INTERVAL_SECS", DEFAULT_EXPIRY_INTERVAL_SECS);

    let cancel = CancellationToken::new();

    let alert_handle = tokio::spawn(alert_loop(pool.clone(), alert_interval, cancel.clone()));
    let expiry_handle = tokio::spawn(expiry_loop(pool.clone(), expiry_interval, cancel.clone()));

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl-C handler");
    tracing::info!("Received SIGINT, stopping sweeps");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), alert_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), expiry_handle).await;
    tracing::info!("Worker stopped");
}

/// Read an interval override from the environment.
fn env_secs(var: &str, default: u64) -> Duration {
    let secs = std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

/// Dispatch all active alerts on a fixed interval until cancelled.
async fn alert_loop(pool: motormate_db::DbPool, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Alert sweep started");
    let mut interval = tokio::time::interval(period);
    let filter = DispatchFilter {
        check_all: true,
        ..Default::default()
    };

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Alert sweep stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = alerts::run_once(&pool, &filter).await {
                    tracing::error!(error = %e, "Alert sweep failed");
                }
            }
        }
    }
}

/// Scan for expiring documents on a fixed interval until cancelled.
async fn expiry_loop(pool: motormate_db::DbPool, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Expiry sweep started");
    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Expiry sweep stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = expiry::run_once(&pool).await {
                    tracing::error!(error = %e, "Expiry sweep failed");
                }
            }
        }
    }
}
