//! Per-update processing: resolve locale, classify, reply.

use super::Gateway;
use crate::commands::{self, Action, CommandContext};
use fruitbot_core::message::{IncomingMessage, OutgoingMessage};
use tracing::{debug, error, info, warn};

impl Gateway {
    /// Process a single incoming update through the full pipeline.
    pub(super) async fn handle_message(&self, incoming: IncomingMessage) {
        let reply = self.build_reply(&incoming).await;
        self.deliver(&incoming, reply).await;
    }

    /// Resolve the chat's locale and build the reply. Never fails: a broken
    /// store degrades to the default locale.
    pub(super) async fn build_reply(&self, incoming: &IncomingMessage) -> OutgoingMessage {
        let preview = if incoming.text.chars().count() > 60 {
            let truncated: String = incoming.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            incoming.text.clone()
        };
        info!(
            "[{}] {} says: {}",
            incoming.channel,
            incoming.sender_name.as_deref().unwrap_or("unknown"),
            match incoming.callback {
                Some(ref cb) => format!("<button {}>", cb.data),
                None => preview,
            }
        );

        let locale = self
            .resolver
            .resolve_or_default(incoming.chat_id, incoming.locale_hint())
            .await;
        debug!("chat {} resolved locale '{locale}'", incoming.chat_id);

        let action = Action::parse(incoming, &locale);
        let ctx = CommandContext {
            resolver: &self.resolver,
            chat_id: incoming.chat_id,
            locale: &locale,
        };
        commands::handle(action, &ctx).await
    }

    async fn deliver(&self, incoming: &IncomingMessage, reply: OutgoingMessage) {
        let Some(channel) = self.channels.get(&incoming.channel) else {
            error!("no channel named '{}' to reply through", incoming.channel);
            return;
        };

        if let Some(ref cb) = incoming.callback {
            if let Err(e) = channel.answer_callback(&cb.id).await {
                warn!("failed to acknowledge button press: {e}");
            }
        }

        if let Err(e) = channel.send(reply).await {
            error!("failed to send reply to chat {}: {e}", incoming.chat_id);
        }
    }
}
