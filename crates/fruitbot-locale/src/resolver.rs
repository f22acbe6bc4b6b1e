//! Locale resolution policy: cache, then store, then client hint, then default.

use crate::cache::LocaleCache;
use fruitbot_core::{error::FruitbotError, locale::SupportedLocale, traits::LocaleStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves and updates the effective locale of a chat.
///
/// The resolver exclusively owns its [`LocaleCache`]. The cache is only
/// written after the matching store call returned successfully, so a resolution
/// cancelled mid-flight never leaves a cached value the store does not have.
pub struct LocaleResolver {
    store: Arc<dyn LocaleStore>,
    cache: LocaleCache,
    supported: Vec<SupportedLocale>,
    default_locale: String,
}

impl LocaleResolver {
    pub fn new(
        store: Arc<dyn LocaleStore>,
        cache: LocaleCache,
        supported: Vec<SupportedLocale>,
        default_locale: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            supported,
            default_locale: default_locale.into(),
        }
    }

    /// Build a resolver, loading the supported locales from the store once.
    pub async fn load(
        store: Arc<dyn LocaleStore>,
        cache: LocaleCache,
        default_locale: impl Into<String>,
    ) -> Result<Self, FruitbotError> {
        let supported = store.list_supported_locales().await?;
        let resolver = Self::new(store, cache, supported, default_locale);
        if !resolver.is_supported(&resolver.default_locale) {
            warn!(
                "default locale '{}' is not in the supported set",
                resolver.default_locale
            );
        }
        info!(
            "locale resolver ready | supported: {} | default: {} | cache: {}",
            resolver
                .supported
                .iter()
                .map(|l| l.code.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            resolver.default_locale,
            resolver.cache.capacity(),
        );
        Ok(resolver)
    }

    pub fn supported(&self) -> &[SupportedLocale] {
        &self.supported
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    pub fn find(&self, code: &str) -> Option<&SupportedLocale> {
        self.supported.iter().find(|l| l.code == code)
    }

    /// Read-only view of the cache.
    pub fn cache(&self) -> &LocaleCache {
        &self.cache
    }

    /// Effective locale for `chat_id`.
    ///
    /// Store errors propagate unchanged; the default locale is returned only
    /// when nothing decides, and is never cached.
    pub async fn resolve(&self, chat_id: i64, hint: Option<&str>) -> Result<String, FruitbotError> {
        if let Some(locale) = self.cache.get(chat_id) {
            return Ok(locale);
        }

        // A set_locale that finished while the store was being read already
        // wrote a newer value into the cache; that value wins over our read.
        if let Some(locale) = self.store.get_preference(chat_id).await? {
            return Ok(self.cache.insert_if_absent(chat_id, &locale));
        }

        if let Some(hint) = hint.filter(|h| !h.is_empty()) {
            if self.is_supported(hint) {
                let stored = self.store.adopt_preference(chat_id, hint).await?;
                let locale = self.cache.insert_if_absent(chat_id, &stored);
                debug!("chat {chat_id}: adopted client locale '{hint}', effective '{locale}'");
                return Ok(locale);
            }
            debug!("chat {chat_id}: client locale '{hint}' not supported");
        }

        Ok(self.default_locale.clone())
    }

    /// Like [`resolve`](Self::resolve), but a store failure degrades to the
    /// default locale so the user's action still goes through.
    pub async fn resolve_or_default(&self, chat_id: i64, hint: Option<&str>) -> String {
        match self.resolve(chat_id, hint).await {
            Ok(locale) => locale,
            Err(e) => {
                warn!("chat {chat_id}: locale resolution failed, using default: {e}");
                self.default_locale.clone()
            }
        }
    }

    /// Explicit user selection: overwrite the stored preference and the cache.
    ///
    /// Codes outside the supported set are rejected with
    /// [`FruitbotError::InvalidLocale`] and leave both untouched.
    pub async fn set_locale(&self, chat_id: i64, locale: &str) -> Result<(), FruitbotError> {
        if !self.is_supported(locale) {
            return Err(FruitbotError::InvalidLocale(locale.to_string()));
        }
        self.store.set_preference(chat_id, locale).await?;
        self.cache.insert(chat_id, locale);
        info!("chat {chat_id}: locale set to '{locale}'");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
