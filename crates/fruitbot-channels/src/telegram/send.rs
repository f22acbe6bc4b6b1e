//! Message sending: text with keyboards, callback acknowledgements, and
//! command registration.

use super::TelegramChannel;
use crate::utils::split_message;
use fruitbot_core::{error::FruitbotError, message::Keyboard};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Telegram's per-message text limit.
const MAX_MESSAGE_LEN: usize = 4096;

impl TelegramChannel {
    /// Send a text message to a chat. The keyboard is attached to the last chunk.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), FruitbotError> {
        let chunks = split_message(text, MAX_MESSAGE_LEN);
        let last = chunks.len().saturating_sub(1);

        for (i, chunk) in chunks.into_iter().enumerate() {
            let markup = if i == last { keyboard } else { None };
            let body = message_body(chat_id, chunk, markup, true);
            let url = format!("{}/sendMessage", self.base_url);

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| FruitbotError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                if error_text.contains("can't parse entities") {
                    warn!("HTML parse failed, retrying as plain text: {error_text}");
                    let plain_body = message_body(chat_id, chunk, markup, false);
                    let plain_resp = self
                        .client
                        .post(&url)
                        .json(&plain_body)
                        .send()
                        .await
                        .map_err(|e| {
                            FruitbotError::Channel(format!("telegram send (plain) failed: {e}"))
                        })?;
                    if !plain_resp.status().is_success() {
                        let plain_err = plain_resp.text().await.unwrap_or_default();
                        return Err(FruitbotError::Channel(format!(
                            "telegram send (plain fallback) failed: {plain_err}"
                        )));
                    }
                } else {
                    return Err(FruitbotError::Channel(format!(
                        "telegram send failed ({status}): {error_text}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Acknowledge an inline keyboard press.
    pub(crate) async fn answer_callback_query(
        &self,
        callback_id: &str,
    ) -> Result<(), FruitbotError> {
        let url = format!("{}/answerCallbackQuery", self.base_url);
        let body = json!({ "callback_query_id": callback_id });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                FruitbotError::Channel(format!("telegram answerCallbackQuery failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(FruitbotError::Channel(format!(
                "telegram answerCallbackQuery failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands = json!({
            "commands": [
                { "command": "start", "description": "Show the main menu" },
                { "command": "lang", "description": "Choose your language" },
                { "command": "help", "description": "List available commands" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}

/// Build a `sendMessage` request body.
pub(crate) fn message_body(
    chat_id: i64,
    text: &str,
    keyboard: Option<&Keyboard>,
    html: bool,
) -> Value {
    let mut body = json!({
        "chat_id": chat_id,
        "text": text,
    });
    if html {
        body["parse_mode"] = json!("HTML");
    }
    if let Some(kb) = keyboard {
        body["reply_markup"] = reply_markup(kb);
    }
    body
}

/// Translate a [`Keyboard`] into Telegram's `reply_markup` object.
pub(crate) fn reply_markup(keyboard: &Keyboard) -> Value {
    match keyboard {
        Keyboard::Reply(rows) => json!({
            "keyboard": rows
                .iter()
                .map(|row| row.iter().map(|label| json!({ "text": label })).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
            "resize_keyboard": true,
        }),
        Keyboard::Inline(rows) => json!({
            "inline_keyboard": rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|b| json!({ "text": b.text, "callback_data": b.callback_data }))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>(),
        }),
    }
}
