mod commands;
mod gateway;
mod i18n;
mod keyboards;

use clap::{Parser, Subcommand};
use fruitbot_channels::telegram::TelegramChannel;
use fruitbot_core::{config, shellexpand, traits::Channel};
use fruitbot_locale::{LocaleCache, LocaleResolver};
use fruitbot_memory::Store;
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fruitbot", version, about = "Telegram menu bot with per-chat languages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Show configuration and store health.
    Status,
    /// List the locales the bot can answer in.
    Locales,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_logging(&cfg.bot);

    match cli.command {
        Commands::Start => {
            let tg = match cfg.telegram {
                Some(ref tg) if tg.enabled => tg.clone(),
                _ => anyhow::bail!(
                    "Telegram is not enabled. Enable it in config.toml or set {}.",
                    config::ENV_BOT_TOKEN
                ),
            };
            if tg.bot_token.is_empty() {
                anyhow::bail!(
                    "Telegram is enabled but bot_token is empty. \
                     Set it in config.toml or {} env var.",
                    config::ENV_BOT_TOKEN
                );
            }

            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
            channels.insert("telegram".to_string(), Arc::new(TelegramChannel::new(tg)));

            let store = Store::new(&cfg.store).await?;
            let cache = LocaleCache::with_capacity(cfg.locale.cache_capacity)?;
            let resolver =
                LocaleResolver::load(Arc::new(store), cache, cfg.locale.default.clone()).await?;

            let gw = Arc::new(gateway::Gateway::new(channels, Arc::new(resolver)));
            gw.run().await?;
        }
        Commands::Status => {
            println!("fruitbot — Status Check\n");
            println!("Config: {}", cli.config);
            println!("Default locale: {}", cfg.locale.default);
            println!("Locale cache capacity: {}", cfg.locale.cache_capacity);
            println!();

            match cfg.telegram {
                Some(ref tg) => println!(
                    "  telegram: {}",
                    if tg.enabled && !tg.bot_token.is_empty() {
                        "configured"
                    } else if tg.enabled {
                        "enabled but missing bot_token"
                    } else {
                        "disabled"
                    }
                ),
                None => println!("  telegram: not configured"),
            }

            let store = Store::new(&cfg.store).await?;
            println!("  store: {}", shellexpand(&cfg.store.db_path));
            println!("  store size: {} bytes", store.db_size().await?);
            println!("  chats with a language: {}", store.count_preferences().await?);
            println!("  supported locales: {}", store.supported_locales().await?.len());
            match store.get_locale(&cfg.locale.default).await? {
                Some(locale) => println!("  default locale: {}", locale.label()),
                None => println!(
                    "  default locale: '{}' is missing from the store",
                    cfg.locale.default
                ),
            }
        }
        Commands::Locales => {
            let store = Store::new(&cfg.store).await?;
            for locale in store.supported_locales().await? {
                let marker = if locale.code == cfg.locale.default {
                    " (default)"
                } else {
                    ""
                };
                println!("{}\t{}{marker}", locale.code, locale.label());
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_logging(bot: &config::BotConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(bot.log_level.as_str()));

    let (file_layer, guard) = if bot.log_to_file {
        let dir = std::path::PathBuf::from(shellexpand(&bot.data_dir)).join("logs");
        let appender = tracing_appender::rolling::daily(dir, "fruitbot.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
