use reqwest::Client;
use serde_json::Value;

use crate::error::Error;
use crate::models::Candle;

#[derive(Clone)]
pub struct BinanceClient {
    http: Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Latest *closed* 1-minute candle for a symbol. The newest kline row
    /// may still be forming, so two rows are requested and the
    /// second-to-last one wins.
    pub async fn get_latest_candle(&self, symbol: &str) -> Result<Candle, Error> {
        let sym = normalize_symbol(symbol);

        let url = format!("{}/api/v3/klines", self.base_url);
        let res = self
            .http
            .get(&url)
            .query(&[("symbol", sym.as_str()), ("interval", "1m"), ("limit", "2")])
            .send()
            .await
            .map_err(|e| Error::DataSource(e.to_string()))?;

        // Binance answers 400 (code -1121) for symbols it does not list.
        if res.status() == reqwest::StatusCode::BAD_REQUEST {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::UnknownSymbol(format!("{sym}: {body}")));
        }
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::DataSource(format!("klines failed: {status} {body}")));
        }

        let rows = res
            .json::<Vec<Vec<Value>>>()
            .await
            .map_err(|e| Error::DataSource(e.to_string()))?;

        let row = match rows.len() {
            0 => return Err(Error::DataSource(format!("no klines returned for {sym}"))),
            1 => &rows[0],
            n => &rows[n - 2],
        };

        parse_kline_row(&sym, row)
    }
}

/// Uppercase, drop any `/` separator, default to the USDT quote
/// (`btc` -> `BTCUSDT`, `BTC/USDT` -> `BTCUSDT`).
pub fn normalize_symbol(symbol: &str) -> String {
    let mut sym = symbol.trim().to_uppercase().replace('/', "");
    if !sym.is_empty() && !sym.ends_with("USDT") {
        sym = format!("{sym}USDT");
    }
    sym
}

// Kline rows are positional arrays:
// [open_time, open, high, low, close, volume, close_time, ...]
pub fn parse_kline_row(symbol: &str, row: &[Value]) -> Result<Candle, Error> {
    if row.len() < 7 {
        return Err(Error::DataSource(format!("short kline row for {symbol}")));
    }

    let open_time = row[0]
        .as_i64()
        .ok_or_else(|| bad_field(symbol, "open_time"))?;
    let open = parse_price(&row[1]).ok_or_else(|| bad_field(symbol, "open"))?;
    let high = parse_price(&row[2]).ok_or_else(|| bad_field(symbol, "high"))?;
    let low = parse_price(&row[3]).ok_or_else(|| bad_field(symbol, "low"))?;
    let close = parse_price(&row[4]).ok_or_else(|| bad_field(symbol, "close"))?;
    let volume = parse_price(&row[5]).ok_or_else(|| bad_field(symbol, "volume"))?;
    let close_time = row[6]
        .as_i64()
        .ok_or_else(|| bad_field(symbol, "close_time"))?;

    Ok(Candle {
        symbol: symbol.to_string(),
        open_time,
        close_time,
        open,
        high,
        low,
        close,
        volume,
    })
}

// Binance encodes prices as JSON strings.
fn parse_price(v: &Value) -> Option<f64> {
    v.as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| v.as_f64())
}

fn bad_field(symbol: &str, field: &str) -> Error {
    Error::DataSource(format!("bad kline field {field} for {symbol}"))
}
