//! The document expiry reminder sweep.

use chrono::{Duration, Utc};
use serde_json::json;

use motormate_core::documents::{days_until, reminder_message, EXPIRY_WINDOW_DAYS};
use motormate_db::models::notification::NewNotification;
use motormate_db::repositories::{GarageRepo, NotificationRepo};
use motormate_db::DbPool;

/// What an expiry pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirySummary {
    pub documents_checked: u64,
    pub notifications_sent: u64,
}

/// Run one expiry pass.
///
/// Finds documents expiring within [`EXPIRY_WINDOW_DAYS`] that have not
/// been reminded, notifies their owners, and flips `reminder_sent` only
/// for documents whose notification actually landed. A failed insert
/// leaves the flag unset so the next pass retries.
pub async fn run_once(pool: &DbPool) -> Result<ExpirySummary, sqlx::Error> {
    let today = Utc::now().date_naive();
    let cutoff = today + Duration::days(EXPIRY_WINDOW_DAYS);

    let expiring = GarageRepo::expiring_documents(pool, cutoff).await?;
    let documents_checked = expiring.len() as u64;
    if expiring.is_empty() {
        tracing::debug!("Expiry pass: no documents in window");
        return Ok(ExpirySummary {
            documents_checked: 0,
            notifications_sent: 0,
        });
    }

    let mut reminded = Vec::new();
    for doc in &expiring {
        let days_left = days_until(doc.expiry_date, today);
        let notification = NewNotification {
            user_id: doc.user_id,
            kind: "document_expiry".to_string(),
            title: format!("{} Expiring Soon", doc.document_type),
            message: reminder_message(
                &doc.document_type,
                &doc.make,
                &doc.model,
                &doc.registration_number,
                days_left,
            ),
            data: json!({ "document_id": doc.id }),
        };
        match NotificationRepo::create(pool, &notification).await {
            Ok(_) => reminded.push(doc.id),
            Err(e) => {
                tracing::error!(document_id = doc.id, error = %e,
                    "Failed to insert expiry notification, will retry next pass");
            }
        }
    }

    let notifications_sent = reminded.len() as u64;
    if !reminded.is_empty() {
        GarageRepo::mark_reminded(pool, &reminded).await?;
    }

    tracing::info!(
        documents_checked,
        notifications_sent,
        "Document expiry pass complete"
    );

    Ok(ExpirySummary {
        documents_checked,
        notifications_sent,
    })
}
