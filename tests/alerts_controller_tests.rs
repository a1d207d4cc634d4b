use axum::{
    Router,
    http::{Request, StatusCode, header},
    routing::post,
};
use http_body_util::BodyExt;
use mongodb::Client;
use strikewatch::services::{binance::BinanceClient, notifier::WebhookNotifier};
use strikewatch::{AppState, config, controllers::alerts_controller};
use tower::ServiceExt;

async fn test_state() -> AppState {
    let settings = config::load();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    AppState {
        db,
        binance: BinanceClient::new(settings.binance_api_url.clone()),
        notifier: WebhookNotifier::new(),
        settings,
    }
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn create_alert_request(body: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri("/alerts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn post_create_alert_rejects_zero_strike() {
    let state = test_state().await;
    let app = Router::new()
        .route("/alerts", post(alerts_controller::post_create_alert))
        .with_state(state);

    let res = app
        .oneshot(create_alert_request(r#"{"symbol":"BTC","strike":0.0}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_body_string(res).await;
    assert!(body.contains("strike must be a positive number"));
}

#[tokio::test]
async fn post_create_alert_rejects_negative_strike() {
    let state = test_state().await;
    let app = Router::new()
        .route("/alerts", post(alerts_controller::post_create_alert))
        .with_state(state);

    let res = app
        .oneshot(create_alert_request(
            r#"{"symbol":"BTC","strike":-100.0,"note":"bad"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_body_string(res).await;
    assert!(body.contains("strike must be a positive number"));
}

#[tokio::test]
async fn post_create_alert_rejects_empty_symbol() {
    let state = test_state().await;
    let app = Router::new()
        .route("/alerts", post(alerts_controller::post_create_alert))
        .with_state(state);

    let res = app
        .oneshot(create_alert_request(r#"{"symbol":"  ","strike":100.0}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_body_string(res).await;
    assert!(body.contains("symbol must not be empty"));
}

#[tokio::test]
async fn post_create_alert_rejects_malformed_symbol() {
    let state = test_state().await;
    let app = Router::new()
        .route("/alerts", post(alerts_controller::post_create_alert))
        .with_state(state);

    let res = app
        .oneshot(create_alert_request(
            r#"{"symbol":"BTC-PERP","strike":100.0}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_body_string(res).await;
    assert!(body.contains("malformed symbol"));
}

#[tokio::test]
async fn post_create_alert_rejects_unknown_direction() {
    let state = test_state().await;
    let app = Router::new()
        .route("/alerts", post(alerts_controller::post_create_alert))
        .with_state(state);

    let res = app
        .oneshot(create_alert_request(
            r#"{"symbol":"BTC","strike":100.0,"direction":"sideways"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_body_string(res).await;
    assert!(body.contains("invalid direction"));
}

#[tokio::test]
async fn post_delete_alert_rejects_malformed_id() {
    let state = test_state().await;
    let app = Router::new()
        .route(
            "/alerts/:id/delete",
            post(alerts_controller::post_delete_alert),
        )
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/alerts/not-an-object-id/delete")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("bad id"));
}
