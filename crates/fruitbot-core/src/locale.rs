use serde::{Deserialize, Serialize};

/// A locale the bot can render, as stored in the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedLocale {
    /// Short unique code, e.g. "en" or "uk".
    pub code: String,
    pub display_name: String,
    /// Decorative flag emoji shown next to the name in menus.
    pub display_flag: String,
}

impl SupportedLocale {
    pub fn new(code: &str, display_name: &str, display_flag: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            display_flag: display_flag.to_string(),
        }
    }

    /// Button label: name followed by flag.
    pub fn label(&self) -> String {
        format!("{} {}", self.display_name, self.display_flag)
    }
}
