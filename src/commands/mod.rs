//! Bot commands and menu actions: instant responses built from the
//! resolved locale.

mod language;
mod menu;


use crate::i18n::{self, t};
use crate::keyboards::LANG_CALLBACK_PREFIX;
use fruitbot_core::message::{IncomingMessage, OutgoingMessage};
use fruitbot_locale::LocaleResolver;

/// Grouped context for action execution.
pub struct CommandContext<'a> {
    pub resolver: &'a LocaleResolver,
    pub chat_id: i64,
    /// Locale resolved for this update.
    pub locale: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fruit {
    Apple,
    Banana,
    Orange,
}

impl Fruit {
    pub const ALL: [Fruit; 3] = [Fruit::Apple, Fruit::Banana, Fruit::Orange];

    fn key(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Banana => "banana",
            Self::Orange => "orange",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Apple => "\u{1F34E}",
            Self::Banana => "\u{1F34C}",
            Self::Orange => "\u{1F34A}",
        }
    }
}

/// What an incoming update asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Help,
    Languages,
    Fruits,
    Fruit(Fruit),
    Back,
    SelectLanguage(String),
    Unknown,
}

impl Action {
    /// Classify an update. Button labels are compared in the chat's locale.
    pub fn parse(msg: &IncomingMessage, locale: &str) -> Self {
        if let Some(ref cb) = msg.callback {
            return match cb.data.strip_prefix(LANG_CALLBACK_PREFIX) {
                Some(code) if !code.is_empty() => Self::SelectLanguage(code.to_string()),
                _ => Self::Unknown,
            };
        }

        let text = msg.text.trim();
        if text.starts_with('/') {
            return Self::parse_command(text);
        }

        if text.ends_with("Reload") || text == t("back", locale) {
            return Self::Back;
        }
        if text == t("language", locale) {
            return Self::Languages;
        }
        if text == t("fruits", locale) {
            return Self::Fruits;
        }
        Fruit::ALL
            .into_iter()
            .find(|f| text == t(f.key(), locale))
            .map(Self::Fruit)
            .unwrap_or(Self::Unknown)
    }

    fn parse_command(text: &str) -> Self {
        let first = text.split_whitespace().next().unwrap_or(text);
        // Strip @botname suffix (e.g. "/lang@fruit_bot" → "/lang").
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/lang" | "/language" => Self::Languages,
            _ => Self::Unknown,
        }
    }
}

/// Handle an action and build the reply.
pub async fn handle(action: Action, ctx: &CommandContext<'_>) -> OutgoingMessage {
    match action {
        Action::Start => menu::handle_start(ctx),
        Action::Help => menu::handle_help(ctx),
        Action::Fruits => menu::handle_fruits(ctx),
        Action::Fruit(fruit) => menu::handle_fruit(ctx, fruit),
        Action::Back | Action::Unknown => menu::handle_back(ctx),
        Action::Languages => language::handle_languages(ctx),
        Action::SelectLanguage(code) => language::handle_select(ctx, &code).await,
    }
}

/// Reply used when the store fails underneath an action.
fn try_later(ctx: &CommandContext<'_>) -> OutgoingMessage {
    OutgoingMessage::new(ctx.chat_id, i18n::t("try_later", ctx.locale))
        .with_keyboard(crate::keyboards::main_keyboard(ctx.locale))
}
