use std::net::SocketAddr;

use mongodb::Client;
use tokio::sync::watch;

use strikewatch::services::{
    alert_monitor, binance::BinanceClient, db_init, notifier::WebhookNotifier,
};
use strikewatch::{AppState, config, routes};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = db_init::ensure_indexes(&db).await {
        tracing::warn!("index init failed: {}", e);
    }

    let state = AppState {
        db,
        binance: BinanceClient::new(settings.binance_api_url.clone()),
        notifier: WebhookNotifier::new(),
        settings: settings.clone(),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor = alert_monitor::spawn_price_alert_monitor(state.clone(), shutdown_rx);

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().unwrap(),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Let an in-flight pass finish before exiting.
    let _ = shutdown_tx.send(true);
    let _ = monitor.await;
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
