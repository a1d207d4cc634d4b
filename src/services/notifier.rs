use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::Error;
use crate::models::{Alert, Candle};

#[derive(Clone)]
pub struct WebhookNotifier {
    http: Client,
}

impl WebhookNotifier {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// One delivery attempt per fire event. The caller logs failures; the
    /// fired mark is never rolled back because delivery failed.
    pub async fn send(&self, webhook_url: &str, payload: &Value) -> Result<(), Error> {
        let res = self
            .http
            .post(webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Delivery(format!("webhook failed: {status} {body}")));
        }

        Ok(())
    }
}

/// Display form of a normalized ticker (BTCUSDT -> BTC/USDT).
pub fn format_ticker(symbol: &str) -> String {
    match symbol.strip_suffix("USDT") {
        Some(base) if !base.is_empty() => format!("{base}/USDT"),
        _ => symbol.to_string(),
    }
}

/// Discord-compatible webhook body for a fired alert. `price` is the value
/// that satisfied the alert: candle high for "up", candle low for "down",
/// the strike itself for "touch".
pub fn build_payload(alert: &Alert, price: f64, candle: &Candle) -> Value {
    let (label, price_field, price_display, color) = match alert.direction.as_str() {
        "up" => ("Up", "Candle High", format!("${price:.2}"), 0x00FF00),
        "down" => ("Down", "Candle Low", format!("${price:.2}"), 0xFF0000),
        _ => (
            "Touched",
            "Candle Range",
            format!("${:.2} - ${:.2}", candle.low, candle.high),
            0x3498DB,
        ),
    };

    let mut fields = vec![
        json!({
            "name": "Strike",
            "value": format!("${:.2} ({label})", alert.strike),
            "inline": true,
        }),
        json!({
            "name": price_field,
            "value": price_display,
            "inline": true,
        }),
    ];

    if !alert.note.is_empty() {
        fields.push(json!({ "name": "Note", "value": alert.note, "inline": false }));
    }

    if let Some(dt) = Utc.timestamp_millis_opt(candle.close_time).single() {
        fields.push(json!({
            "name": "Candle Time",
            "value": dt.format("%Y-%m-%d %H:%M UTC").to_string(),
            "inline": false,
        }));
    }

    json!({
        "embeds": [{
            "title": format!("{} Price Alert", format_ticker(&alert.symbol)),
            "color": color,
            "fields": fields,
        }]
    })
}
