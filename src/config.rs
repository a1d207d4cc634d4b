use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub binance_api_url: String,
    pub webhook_url: String,
    pub poll_interval_secs: u64,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "strikewatch".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    // Overridable: Binance blocks some regions, so deployments may need a
    // proxy or mirror host.
    let binance_api_url = env::var("BINANCE_API_URL")
        .unwrap_or_else(|_| "https://api.binance.com".to_string());

    // Default notification destination; a runtime setting takes precedence.
    let webhook_url = env::var("WEBHOOK_URL").unwrap_or_default();

    let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60);

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        binance_api_url,
        webhook_url,
        poll_interval_secs,
    }
}
