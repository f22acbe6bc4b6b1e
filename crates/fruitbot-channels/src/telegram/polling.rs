//! Long-polling update loop and Channel trait implementation.

use super::types::{TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use fruitbot_core::{
    error::FruitbotError,
    message::{CallbackPress, IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, FruitbotError> {
        self.register_commands().await;

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let allowed_users = self.config.allowed_users.clone();
        let poll_timeout = self.config.poll_timeout_secs;
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!(
                    "{base_url}/getUpdates?timeout={poll_timeout}\
                     &allowed_updates=%5B%22message%22%2C%22callback_query%22%5D"
                );
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(std::time::Duration::from_secs(poll_timeout + 5))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let Some(incoming) = to_incoming(update, &allowed_users) else {
                        continue;
                    };

                    if tx.send(incoming).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), FruitbotError> {
        self.send_text(message.chat_id, &message.text, message.keyboard.as_ref())
            .await
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), FruitbotError> {
        self.answer_callback_query(callback_id).await
    }

    async fn stop(&self) -> Result<(), FruitbotError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

/// Convert a raw update into an [`IncomingMessage`].
///
/// Returns `None` for update kinds the bot ignores, updates without a sender,
/// and senders outside a non-empty `allowed_users` list.
pub(crate) fn to_incoming(update: TgUpdate, allowed_users: &[i64]) -> Option<IncomingMessage> {
    let (user, chat_id, text, callback) = if let Some(msg) = update.message {
        let text = msg.text?;
        (msg.from?, msg.chat.id, text, None)
    } else if let Some(query) = update.callback_query {
        let Some(message) = query.message else {
            debug!("telegram: callback {} has no message, skipping", query.id);
            return None;
        };
        let press = CallbackPress {
            id: query.id,
            data: query.data.unwrap_or_default(),
        };
        (query.from, message.chat.id, String::new(), Some(press))
    } else {
        return None;
    };

    // Auth check.
    if !allowed_users.is_empty() && !allowed_users.contains(&user.id) {
        warn!("ignoring update from unauthorized user {}", user.id);
        return None;
    }

    Some(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        chat_id,
        sender_id: user.id.to_string(),
        sender_name: Some(user.display_name()),
        text,
        language_code: user.language_code.clone(),
        callback,
        timestamp: chrono::Utc::now(),
    })
}
