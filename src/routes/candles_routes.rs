use axum::{Router, routing::get};

use crate::{AppState, controllers::candles_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/candles/:symbol",
        get(candles_controller::get_latest_candle),
    )
}
