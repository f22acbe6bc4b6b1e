//! Internationalization: localized strings for menu and command responses.
//!
//! Uses a simple `t(key, locale)` function for static strings and
//! format helpers for strings with interpolation.
//! Supported locales: English (fallback) and Ukrainian.


/// Label of the reload button shown after a language switch.
/// Untranslated; incoming text is matched by its `Reload` suffix.
pub const RELOAD: &str = "\u{1F504} Reload";

/// Return a localized static string for `key` in the given `locale`.
/// Falls back to English for unsupported locales and `"???"` for unknown keys.
pub fn t(key: &str, locale: &str) -> &'static str {
    match key {
        // --- Greetings and prompts ---
        "hello" => match locale {
            "uk" => "Привіт!",
            _ => "Hello!",
        },
        "select_option" => match locale {
            "uk" => "Оберіть опцію",
            _ => "Select option",
        },
        "languages" => match locale {
            "uk" => "Мови",
            _ => "Languages",
        },
        "help" => match locale {
            "uk" => "Команди:\n/start — головне меню\n/lang — обрати мову\n/help — ця довідка",
            _ => "Commands:\n/start — main menu\n/lang — choose language\n/help — this help",
        },
        "language_unavailable" => match locale {
            "uk" => "Ця мова недоступна.",
            _ => "This language is not available.",
        },
        "try_later" => match locale {
            "uk" => "Щось пішло не так. Спробуйте пізніше.",
            _ => "Something went wrong. Please try again later.",
        },

        // --- Button labels ---
        "language" => match locale {
            "uk" => "Мова",
            _ => "Language",
        },
        "fruits" => match locale {
            "uk" => "Фрукти",
            _ => "Fruits",
        },
        "apple" => match locale {
            "uk" => "Яблуко",
            _ => "Apple",
        },
        "banana" => match locale {
            "uk" => "Банан",
            _ => "Banana",
        },
        "orange" => match locale {
            "uk" => "Апельсин",
            _ => "Orange",
        },
        "back" => match locale {
            "uk" => "Назад",
            _ => "Back",
        },
        _ => "???",
    }
}

/// Confirmation shown after a language switch, e.g. "New language: English 🇬🇧".
pub fn new_language(locale: &str, label: &str) -> String {
    match locale {
        "uk" => format!("Нова мова: {label}"),
        _ => format!("New language: {label}"),
    }
}
