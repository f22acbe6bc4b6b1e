//! Gateway: the main event loop connecting channels to the locale resolver
//! and the menu handlers.

mod pipeline;


use fruitbot_core::{message::IncomingMessage, traits::Channel};
use fruitbot_locale::LocaleResolver;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// The central gateway that routes updates from channels to handlers.
pub struct Gateway {
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) resolver: Arc<LocaleResolver>,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(channels: HashMap<String, Arc<dyn Channel>>, resolver: Arc<LocaleResolver>) -> Self {
        Self { channels, resolver }
    }

    /// Run the main event loop until Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "fruitbot gateway running | channels: {} | locales: {} | default: {}",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            self.resolver.supported().len(),
            self.resolver.default_locale(),
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        // Main event loop with graceful shutdown.
        loop {
            tokio::select! {
                maybe = rx.recv() => {
                    let Some(incoming) = maybe else {
                        warn!("all channels closed, stopping gateway");
                        break;
                    };
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.handle_message(incoming).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    async fn shutdown(&self) {
        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }
        info!("fruitbot gateway stopped");
    }
}
