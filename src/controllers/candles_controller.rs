use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, error::Error};

fn error_response(e: Error) -> Response {
    let status = match &e {
        Error::UnknownSymbol(_) => StatusCode::BAD_REQUEST,
        Error::DataSource(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

// GET /candles/:symbol
// Latest closed 1m candle, for eyeballing what the monitor would evaluate.
pub async fn get_latest_candle(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    match state.binance.get_latest_candle(&symbol).await {
        Ok(c) => Json(json!({
            "symbol": c.symbol,
            "open_time": c.open_time,
            "close_time": c.close_time,
            "open": c.open,
            "high": c.high,
            "low": c.low,
            "close": c.close,
            "volume": c.volume,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
