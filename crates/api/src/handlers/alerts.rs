//! Handlers for the vehicle alert dispatcher.

use axum::extract::{Query, State};
use axum::Json;
use motormate_core::alerts::AlertType;
use motormate_core::types::{DbId, UserId};
use motormate_db::repositories::VehicleAlertRepo;
use motormate_worker::alerts::{run_once, DispatchFilter};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /alerts/dispatch`.
#[derive(Debug, Default, Deserialize)]
pub struct DispatchRequest {
    pub vehicle_id: Option<DbId>,
    pub alert_type: Option<String>,
    #[serde(default)]
    pub check_all: bool,
}

/// Response payload for `POST /alerts/dispatch`.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub triggered_alerts: u64,
    pub notifications_sent: u64,
    pub alerts_checked: u64,
}

/// POST /api/v1/alerts/dispatch
///
/// Run one dispatch pass. With `check_all` the vehicle/type filters are
/// ignored and every active watch is evaluated, which is what the
/// periodic scheduler sends.
pub async fn dispatch(
    State(state): State<AppState>,
    Json(input): Json<DispatchRequest>,
) -> AppResult<Json<DataResponse<DispatchResponse>>> {
    let alert_type = input
        .alert_type
        .as_deref()
        .map(str::parse::<AlertType>)
        .transpose()
        .map_err(AppError::Core)?;

    let filter = DispatchFilter {
        vehicle_id: input.vehicle_id,
        alert_type,
        check_all: input.check_all,
    };

    let summary = run_once(&state.pool, &filter).await?;

    Ok(Json(DataResponse {
        data: DispatchResponse {
            triggered_alerts: summary.triggered_alerts,
            notifications_sent: summary.notifications_sent,
            alerts_checked: summary.alerts_checked,
        },
    }))
}

/// Query parameters for `GET /alerts`.
#[derive(Debug, Deserialize)]
pub struct ListAlertsQuery {
    pub user_id: UserId,
}

/// GET /api/v1/alerts
///
/// The user's active watches.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAlertsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let watches = VehicleAlertRepo::list_for_user(&state.pool, params.user_id).await?;
    Ok(Json(serde_json::json!({ "data": watches })))
}
