//! Keyboards attached to bot replies.

use crate::i18n::{self, t};
use fruitbot_core::{
    locale::SupportedLocale,
    message::{InlineButton, Keyboard},
};

/// Callback-data prefix of language selection buttons.
pub const LANG_CALLBACK_PREFIX: &str = "lang:";

pub fn main_keyboard(locale: &str) -> Keyboard {
    Keyboard::Reply(vec![vec![
        t("language", locale).to_string(),
        t("fruits", locale).to_string(),
    ]])
}

pub fn fruits_keyboard(locale: &str) -> Keyboard {
    Keyboard::Reply(vec![
        vec![
            t("apple", locale).to_string(),
            t("banana", locale).to_string(),
            t("orange", locale).to_string(),
        ],
        vec![t("back", locale).to_string()],
    ])
}

/// One inline button per supported locale, one per row.
pub fn language_keyboard(locales: &[SupportedLocale]) -> Keyboard {
    Keyboard::Inline(
        locales
            .iter()
            .map(|l| {
                vec![InlineButton {
                    text: l.label(),
                    callback_data: format!("{LANG_CALLBACK_PREFIX}{}", l.code),
                }]
            })
            .collect(),
    )
}

pub fn reload_keyboard() -> Keyboard {
    Keyboard::Reply(vec![vec![i18n::RELOAD.to_string()]])
}
