//! Handlers for the `/notifications` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use motormate_core::error::CoreError;
use motormate_core::types::{DbId, UserId};
use motormate_db::repositories::NotificationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub user_id: UserId,
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
///
/// List a user's notifications with optional filtering.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, params.user_id, unread_only, limit, offset)
            .await?;

    Ok(Json(serde_json::json!({ "data": notifications })))
}

/// Request body for the mark-read endpoints.
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub user_id: UserId,
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark a single notification as read. Returns 204 No Content on success,
/// or 404 if the notification does not belong to the given user.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
    Json(input): Json<MarkReadRequest>,
) -> AppResult<impl IntoResponse> {
    let found =
        NotificationRepo::mark_read(&state.pool, notification_id, input.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::not_found(
            "Notification",
            notification_id,
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
///
/// Mark all of the user's notifications as read. Returns the number of
/// notifications that were marked.
pub async fn mark_all_read(
    State(state): State<AppState>,
    Json(input): Json<MarkReadRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, input.user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "marked_read": count }
    })))
}

/// Query parameters for `GET /notifications/unread-count`.
#[derive(Debug, Deserialize)]
pub struct UnreadCountQuery {
    pub user_id: UserId,
}

/// GET /api/v1/notifications/unread-count
///
/// Return the number of unread notifications for a user.
pub async fn unread_count(
    State(state): State<AppState>,
    Query(params): Query<UnreadCountQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, params.user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "count": count }
    })))
}
