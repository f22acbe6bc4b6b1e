use crate::{
    error::FruitbotError,
    locale::SupportedLocale,
    message::{IncomingMessage, OutgoingMessage},
};
use async_trait::async_trait;

/// Messaging Channel trait.
///
/// Every messaging platform implements this trait to receive updates and
/// send responses.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming updates.
    /// Returns a receiver that yields incoming messages and button presses.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, FruitbotError>;

    /// Send a response back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), FruitbotError>;

    /// Acknowledge an inline button press so the client stops its spinner.
    async fn answer_callback(&self, _callback_id: &str) -> Result<(), FruitbotError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), FruitbotError>;
}

/// Durable chat -> locale preferences plus the supported-locale reference table.
///
/// Every call is atomic on its own. Two `set_preference` calls racing on the
/// same chat resolve as last-write-wins.
#[async_trait]
pub trait LocaleStore: Send + Sync {
    /// Persisted preference for `chat_id`, if any.
    async fn get_preference(&self, chat_id: i64) -> Result<Option<String>, FruitbotError>;

    /// Insert or overwrite the preference for `chat_id`.
    async fn set_preference(&self, chat_id: i64, locale: &str) -> Result<(), FruitbotError>;

    /// Store `locale` only if `chat_id` has no preference yet, and return the
    /// preference that is stored once the call completes.
    ///
    /// A concurrent explicit selection is never overwritten by this call.
    async fn adopt_preference(&self, chat_id: i64, locale: &str) -> Result<String, FruitbotError>;

    /// Supported locales in reference-data insertion order.
    async fn list_supported_locales(&self) -> Result<Vec<SupportedLocale>, FruitbotError>;
}
