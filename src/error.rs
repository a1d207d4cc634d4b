use thiserror::Error;

/// Failure kinds the rest of the crate tells apart. `Validation` and
/// `UnknownSymbol` surface to the caller synchronously; `DataSource` and
/// monitor-side `Persistence` failures are skip-and-retry-next-tick;
/// `Delivery` is logged and never retried for the same fire event.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid alert: {0}")]
    Validation(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("market data error: {0}")]
    DataSource(String),

    #[error("storage error: {0}")]
    Persistence(String),

    #[error("notification error: {0}")]
    Delivery(String),
}
