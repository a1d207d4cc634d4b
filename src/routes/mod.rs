use axum::Router;

use crate::AppState;

pub mod alerts_routes;
pub mod candles_routes;
pub mod home_routes;
pub mod settings_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = alerts_routes::add_routes(router);
    let router = candles_routes::add_routes(router);
    let router = settings_routes::add_routes(router);

    router.with_state(state)
}
