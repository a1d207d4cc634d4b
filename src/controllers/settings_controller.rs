use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, services::settings_service};

#[derive(Deserialize)]
pub struct WebhookBody {
    pub url: String,
}

// POST /settings/webhook
pub async fn post_set_webhook(
    State(state): State<AppState>,
    Json(body): Json<WebhookBody>,
) -> Response {
    let url = body.url.trim();
    if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "webhook url must be http(s)" })),
        )
            .into_response();
    }

    match settings_service::set_webhook_url(&state, url).await {
        Ok(()) => Json(json!({ "webhook_url": url })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

// GET /settings/webhook
pub async fn get_webhook(State(state): State<AppState>) -> Response {
    match settings_service::webhook_url(&state).await {
        Ok(url) => Json(json!({ "webhook_url": url })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
