use thiserror::Error;

/// Top-level error type for fruitbot.
#[derive(Debug, Error)]
pub enum FruitbotError {
    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The locale store could not be reached or the query failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A locale code outside the supported set.
    #[error("unsupported locale: {0}")]
    InvalidLocale(String),
}
