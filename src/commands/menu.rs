//! Main menu and fruit submenu.

use super::{CommandContext, Fruit};
use crate::i18n::t;
use crate::keyboards::{fruits_keyboard, main_keyboard};
use fruitbot_core::message::OutgoingMessage;

pub(super) fn handle_start(ctx: &CommandContext<'_>) -> OutgoingMessage {
    OutgoingMessage::new(ctx.chat_id, t("hello", ctx.locale))
        .with_keyboard(main_keyboard(ctx.locale))
}

pub(super) fn handle_help(ctx: &CommandContext<'_>) -> OutgoingMessage {
    OutgoingMessage::new(ctx.chat_id, t("help", ctx.locale))
        .with_keyboard(main_keyboard(ctx.locale))
}

/// "Back", "Reload", and anything unrecognised land on the main menu.
pub(super) fn handle_back(ctx: &CommandContext<'_>) -> OutgoingMessage {
    OutgoingMessage::new(ctx.chat_id, t("select_option", ctx.locale))
        .with_keyboard(main_keyboard(ctx.locale))
}

pub(super) fn handle_fruits(ctx: &CommandContext<'_>) -> OutgoingMessage {
    OutgoingMessage::new(ctx.chat_id, t("fruits", ctx.locale))
        .with_keyboard(fruits_keyboard(ctx.locale))
}

pub(super) fn handle_fruit(ctx: &CommandContext<'_>, fruit: Fruit) -> OutgoingMessage {
    OutgoingMessage::new(ctx.chat_id, fruit.emoji()).with_keyboard(fruits_keyboard(ctx.locale))
}
