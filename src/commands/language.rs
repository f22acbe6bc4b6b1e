//! Language menu and explicit language selection.

use super::{try_later, CommandContext};
use crate::i18n::{self, t};
use crate::keyboards::{language_keyboard, main_keyboard, reload_keyboard};
use fruitbot_core::{error::FruitbotError, message::OutgoingMessage};
use tracing::{info, warn};

pub(super) fn handle_languages(ctx: &CommandContext<'_>) -> OutgoingMessage {
    OutgoingMessage::new(ctx.chat_id, t("languages", ctx.locale))
        .with_keyboard(language_keyboard(ctx.resolver.supported()))
}

/// Persist the chosen locale and confirm in that locale.
pub(super) async fn handle_select(ctx: &CommandContext<'_>, code: &str) -> OutgoingMessage {
    match ctx.resolver.set_locale(ctx.chat_id, code).await {
        Ok(()) => {
            info!("chat {} switched language to {code}", ctx.chat_id);
            let label = ctx
                .resolver
                .find(code)
                .map(|l| l.label())
                .unwrap_or_else(|| code.to_string());
            OutgoingMessage::new(ctx.chat_id, i18n::new_language(code, &label))
                .with_keyboard(reload_keyboard())
        }
        Err(FruitbotError::InvalidLocale(_)) => {
            warn!("chat {} selected unsupported locale '{code}'", ctx.chat_id);
            OutgoingMessage::new(ctx.chat_id, t("language_unavailable", ctx.locale))
                .with_keyboard(main_keyboard(ctx.locale))
        }
        Err(e) => {
            warn!("chat {}: failed to store language '{code}': {e}", ctx.chat_id);
            try_later(ctx)
        }
    }
}
