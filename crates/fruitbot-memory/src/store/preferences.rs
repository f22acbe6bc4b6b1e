//! Chat -> locale preferences and the `LocaleStore` implementation.

use super::Store;
use async_trait::async_trait;
use fruitbot_core::{error::FruitbotError, locale::SupportedLocale, traits::LocaleStore};
use tracing::debug;

impl Store {
    /// Stored locale for a chat. `None` if the chat has no row or a NULL locale.
    pub async fn get_chat_locale(&self, chat_id: i64) -> Result<Option<String>, FruitbotError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT locale FROM chat_preferences WHERE chat_id = ?")
                .bind(chat_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| FruitbotError::StoreUnavailable(format!("query failed: {e}")))?;

        Ok(row.and_then(|(locale,)| locale))
    }

    /// Upsert a chat's locale inside a transaction.
    ///
    /// The transaction rolls back on drop if the commit is never reached.
    pub async fn set_chat_locale(&self, chat_id: i64, locale: &str) -> Result<(), FruitbotError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| FruitbotError::StoreUnavailable(format!("begin failed: {e}")))?;

        sqlx::query(
            "INSERT INTO chat_preferences (chat_id, locale) VALUES (?, ?) \
             ON CONFLICT(chat_id) DO UPDATE SET locale = excluded.locale, updated_at = datetime('now')",
        )
        .bind(chat_id)
        .bind(locale)
        .execute(&mut *tx)
        .await
        .map_err(|e| FruitbotError::StoreUnavailable(format!("upsert preference failed: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| FruitbotError::StoreUnavailable(format!("commit failed: {e}")))?;

        debug!("stored locale '{locale}' for chat {chat_id}");
        Ok(())
    }

    /// Store `locale` for a chat that has no locale yet and return the locale
    /// the row holds afterwards. An existing non-NULL locale is kept.
    pub async fn adopt_chat_locale(&self, chat_id: i64, locale: &str) -> Result<String, FruitbotError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| FruitbotError::StoreUnavailable(format!("begin failed: {e}")))?;

        sqlx::query(
            "INSERT INTO chat_preferences (chat_id, locale) VALUES (?, ?) \
             ON CONFLICT(chat_id) DO UPDATE SET locale = excluded.locale, updated_at = datetime('now') \
             WHERE chat_preferences.locale IS NULL",
        )
        .bind(chat_id)
        .bind(locale)
        .execute(&mut *tx)
        .await
        .map_err(|e| FruitbotError::StoreUnavailable(format!("adopt preference failed: {e}")))?;

        let (stored,): (Option<String>,) =
            sqlx::query_as("SELECT locale FROM chat_preferences WHERE chat_id = ?")
                .bind(chat_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| FruitbotError::StoreUnavailable(format!("query failed: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| FruitbotError::StoreUnavailable(format!("commit failed: {e}")))?;

        let stored = stored.unwrap_or_else(|| locale.to_string());
        debug!("chat {chat_id} adopted locale '{stored}'");
        Ok(stored)
    }

    /// Number of chats with a known locale.
    pub async fn count_preferences(&self) -> Result<i64, FruitbotError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM chat_preferences WHERE locale IS NOT NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| FruitbotError::StoreUnavailable(format!("query failed: {e}")))?;

        Ok(count)
    }
}

#[async_trait]
impl LocaleStore for Store {
    async fn get_preference(&self, chat_id: i64) -> Result<Option<String>, FruitbotError> {
        self.get_chat_locale(chat_id).await
    }

    async fn set_preference(&self, chat_id: i64, locale: &str) -> Result<(), FruitbotError> {
        self.set_chat_locale(chat_id, locale).await
    }

    async fn adopt_preference(&self, chat_id: i64, locale: &str) -> Result<String, FruitbotError> {
        self.adopt_chat_locale(chat_id, locale).await
    }

    async fn list_supported_locales(&self) -> Result<Vec<SupportedLocale>, FruitbotError> {
        self.supported_locales().await
    }
}
