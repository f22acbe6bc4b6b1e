mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::FruitbotError;
use defaults::*;

/// Environment variable that overrides `telegram.bot_token`.
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable that overrides `store.db_path`.
pub const ENV_DB_PATH: &str = "FRUITBOT_DB_PATH";

/// Top-level fruitbot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write logs to a daily file under `{data_dir}/logs`.
    #[serde(default)]
    pub log_to_file: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_to_file: false,
        }
    }
}

/// Preference store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Locale resolution config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale used when neither the store nor the client hint decides.
    #[serde(default = "default_locale")]
    pub default: String,
    /// Maximum number of chats kept in the in-process locale cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: default_locale(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Config {
    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_BOT_TOKEN).filter(|t| !t.is_empty()) {
            let tg = self.telegram.get_or_insert_with(TelegramConfig::default);
            tg.bot_token = token;
            tg.enabled = true;
        }
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.is_empty()) {
            self.store.db_path = path;
        }
    }

    /// Reject values the bot cannot run with.
    pub fn validate(&self) -> Result<(), FruitbotError> {
        if self.locale.default.trim().is_empty() {
            return Err(FruitbotError::Config(
                "locale.default must not be empty".into(),
            ));
        }
        if self.locale.cache_capacity == 0 {
            return Err(FruitbotError::Config(
                "locale.cache_capacity must be greater than zero".into(),
            ));
        }
        if self.store.max_connections == 0 {
            return Err(FruitbotError::Config(
                "store.max_connections must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file, then apply environment overrides.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, FruitbotError> {
    let mut config = parse_file(path)?;
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

fn parse_file(path: &str) -> Result<Config, FruitbotError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FruitbotError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| FruitbotError::Config(format!("failed to parse config: {}", e)))
}
