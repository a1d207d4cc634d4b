use serde::{Deserialize, Serialize};

/// One closed 1-minute candle. Never persisted; fetched fresh each pass.
/// Times are unix milliseconds, as Binance reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}
