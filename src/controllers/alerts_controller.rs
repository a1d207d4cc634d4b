use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::Error, models::Alert, services::alerts_service};

fn error_response(e: Error) -> Response {
    let status = match &e {
        Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::UnknownSymbol(_) => StatusCode::BAD_REQUEST,
        Error::DataSource(_) => StatusCode::BAD_GATEWAY,
        Error::Persistence(_) | Error::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

fn alert_json(a: &Alert) -> serde_json::Value {
    json!({
        "id": a.id.to_hex(),
        "symbol": a.symbol,
        "direction": a.direction,
        "strike": a.strike,
        "note": a.note,
        "created_at": a.created_at,
    })
}

#[derive(Deserialize)]
pub struct CreateAlertBody {
    pub symbol: String,
    pub strike: f64,
    pub direction: Option<String>,
    pub note: Option<String>,
}

// POST /alerts
pub async fn post_create_alert(
    State(state): State<AppState>,
    Json(body): Json<CreateAlertBody>,
) -> Response {
    if let Err(e) =
        alerts_service::validate_alert_input(&body.symbol, body.strike, body.direction.as_deref())
    {
        return error_response(e);
    }

    // Reject symbols the market data source does not list before storing
    // anything; a transient fetch error must not block creation.
    match state.binance.get_latest_candle(&body.symbol).await {
        Ok(_) => {}
        Err(Error::UnknownSymbol(msg)) => {
            return error_response(Error::UnknownSymbol(msg));
        }
        Err(e) => {
            tracing::warn!("symbol precheck skipped: {}", e);
        }
    }

    let alert = match alerts_service::create_alert(
        &state,
        &body.symbol,
        body.strike,
        body.direction.as_deref(),
        body.note.as_deref().unwrap_or(""),
    )
    .await
    {
        Ok(a) => a,
        Err(e) => return error_response(e),
    };

    (StatusCode::CREATED, Json(alert_json(&alert))).into_response()
}

// GET /alerts
pub async fn get_alerts(State(state): State<AppState>) -> Response {
    let alerts = match alerts_service::list_active(&state).await {
        Ok(v) => v,
        Err(e) => return error_response(e),
    };

    let items: Vec<serde_json::Value> = alerts.iter().map(alert_json).collect();

    Json(json!({ "alerts": items })).into_response()
}

// POST /alerts/:id/delete
pub async fn post_delete_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let oid = match ObjectId::parse_str(&id) {
        Ok(x) => x,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad id" }))).into_response();
        }
    };

    match alerts_service::remove_alert(&state, oid).await {
        Ok(true) => Json(json!({ "removed": true })).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "alert not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
