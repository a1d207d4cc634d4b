use axum::{Router, routing::get};

use crate::{AppState, controllers::settings_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/settings/webhook",
        get(settings_controller::get_webhook).post(settings_controller::post_set_webhook),
    )
}
