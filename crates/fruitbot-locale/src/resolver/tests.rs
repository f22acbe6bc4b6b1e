use super::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Holds the next `get_preference` after it has read: signals `read`, then
/// waits for `release`.
struct ReadGate {
    read: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// In-memory store that counts calls and can be switched offline.
#[derive(Default)]
struct CountingStore {
    prefs: Mutex<HashMap<i64, String>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    offline: AtomicBool,
    fail_writes: AtomicBool,
    gate: Mutex<Option<ReadGate>>,
}

impl CountingStore {
    fn with_pref(chat_id: i64, locale: &str) -> Self {
        let store = Self::default();
        store
            .prefs
            .lock()
            .unwrap()
            .insert(chat_id, locale.to_string());
        store
    }

    /// Pause the next store read; returns (read done, release).
    fn hold_next_read(&self) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (read_tx, read_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(ReadGate {
            read: read_tx,
            release: release_rx,
        });
        (read_rx, release_tx)
    }

    fn calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst) + self.sets.load(Ordering::SeqCst)
    }

    fn stored(&self, chat_id: i64) -> Option<String> {
        self.prefs.lock().unwrap().get(&chat_id).cloned()
    }
}

#[async_trait]
impl LocaleStore for CountingStore {
    async fn get_preference(&self, chat_id: i64) -> Result<Option<String>, FruitbotError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(FruitbotError::StoreUnavailable("offline".into()));
        }
        let value = self.stored(chat_id);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.read.send(());
            let _ = gate.release.await;
        }
        Ok(value)
    }

    async fn set_preference(&self, chat_id: i64, locale: &str) -> Result<(), FruitbotError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) || self.fail_writes.load(Ordering::SeqCst) {
            return Err(FruitbotError::StoreUnavailable("offline".into()));
        }
        self.prefs
            .lock()
            .unwrap()
            .insert(chat_id, locale.to_string());
        Ok(())
    }

    async fn adopt_preference(&self, chat_id: i64, locale: &str) -> Result<String, FruitbotError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) || self.fail_writes.load(Ordering::SeqCst) {
            return Err(FruitbotError::StoreUnavailable("offline".into()));
        }
        Ok(self
            .prefs
            .lock()
            .unwrap()
            .entry(chat_id)
            .or_insert_with(|| locale.to_string())
            .clone())
    }

    async fn list_supported_locales(&self) -> Result<Vec<SupportedLocale>, FruitbotError> {
        Ok(supported())
    }
}

fn supported() -> Vec<SupportedLocale> {
    vec![
        SupportedLocale::new("en", "English", "\u{1F1EC}\u{1F1E7}"),
        SupportedLocale::new("uk", "Українська", "\u{1F1FA}\u{1F1E6}"),
    ]
}

fn resolver_with(store: Arc<CountingStore>, capacity: usize) -> LocaleResolver {
    LocaleResolver::new(
        store,
        LocaleCache::with_capacity(capacity).unwrap(),
        supported(),
        "en",
    )
}

#[tokio::test]
async fn test_cache_hit_makes_no_store_calls() {
    let store = Arc::new(CountingStore::default());
    let resolver = resolver_with(store.clone(), 10);
    resolver.cache.insert(1, "uk");

    let locale = resolver.resolve(1, Some("en")).await.unwrap();
    assert_eq!(locale, "uk");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_store_hit_populates_cache() {
    let store = Arc::new(CountingStore::with_pref(5, "uk"));
    let resolver = resolver_with(store.clone(), 10);

    assert_eq!(resolver.resolve(5, None).await.unwrap(), "uk");
    assert_eq!(store.gets.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.cache().peek(5).as_deref(), Some("uk"));

    assert_eq!(resolver.resolve(5, Some("en")).await.unwrap(), "uk");
    assert_eq!(store.calls(), 1, "second resolve must be served from cache");
}

#[tokio::test]
async fn test_supported_hint_is_adopted_and_persisted() {
    let store = Arc::new(CountingStore::default());
    let resolver = resolver_with(store.clone(), 10);

    assert_eq!(resolver.resolve(7, Some("uk")).await.unwrap(), "uk");
    assert_eq!(store.stored(7).as_deref(), Some("uk"));
    assert_eq!(
        store.get_preference(7).await.unwrap().as_deref(),
        Some("uk")
    );
    assert_eq!(resolver.cache().peek(7).as_deref(), Some("uk"));
}

#[tokio::test]
async fn test_unsupported_hint_falls_back_to_default_without_write() {
    let store = Arc::new(CountingStore::default());
    let resolver = resolver_with(store.clone(), 10);

    assert_eq!(resolver.resolve(7, Some("fr")).await.unwrap(), "en");
    assert_eq!(store.sets.load(Ordering::SeqCst), 0);
    assert_eq!(store.stored(7), None);
}

#[tokio::test]
async fn test_missing_or_empty_hint_returns_default() {
    let store = Arc::new(CountingStore::default());
    let resolver = resolver_with(store.clone(), 10);

    assert_eq!(resolver.resolve(1, None).await.unwrap(), "en");
    assert_eq!(resolver.resolve(2, Some("")).await.unwrap(), "en");
    assert_eq!(store.sets.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_default_is_not_cached() {
    let store = Arc::new(CountingStore::default());
    let resolver = resolver_with(store.clone(), 10);

    assert_eq!(resolver.resolve(3, Some("fr")).await.unwrap(), "en");
    assert!(resolver.cache().is_empty());

    // A later supported hint is still honoured.
    assert_eq!(resolver.resolve(3, Some("uk")).await.unwrap(), "uk");
    assert_eq!(store.stored(3).as_deref(), Some("uk"));
}

#[tokio::test]
async fn test_stored_preference_beats_hint() {
    let store = Arc::new(CountingStore::with_pref(9, "en"));
    let resolver = resolver_with(store.clone(), 10);

    assert_eq!(resolver.resolve(9, Some("uk")).await.unwrap(), "en");
    assert_eq!(store.sets.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_set_locale_overrides_any_hint() {
    let store = Arc::new(CountingStore::with_pref(4, "en"));
    let resolver = resolver_with(store.clone(), 10);
    assert_eq!(resolver.resolve(4, None).await.unwrap(), "en");

    resolver.set_locale(4, "uk").await.unwrap();
    assert_eq!(resolver.resolve(4, Some("en")).await.unwrap(), "uk");
    assert_eq!(store.stored(4).as_deref(), Some("uk"));
}

#[tokio::test]
async fn test_set_locale_rejects_unsupported_code() {
    let store = Arc::new(CountingStore::with_pref(4, "en"));
    let resolver = resolver_with(store.clone(), 10);

    let err = resolver.set_locale(4, "fr").await.unwrap_err();
    assert!(matches!(err, FruitbotError::InvalidLocale(ref c) if c == "fr"));
    assert_eq!(store.sets.load(Ordering::SeqCst), 0);
    assert_eq!(store.stored(4).as_deref(), Some("en"));
    assert_eq!(resolver.cache().peek(4), None);
}

#[tokio::test]
async fn test_store_unavailable_propagates() {
    let store = Arc::new(CountingStore::default());
    store.offline.store(true, Ordering::SeqCst);
    let resolver = resolver_with(store.clone(), 10);

    let err = resolver.resolve(1, Some("uk")).await.unwrap_err();
    assert!(matches!(err, FruitbotError::StoreUnavailable(_)));
    // No retry.
    assert_eq!(store.gets.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_resolve_or_default_degrades_on_store_failure() {
    let store = Arc::new(CountingStore::default());
    store.offline.store(true, Ordering::SeqCst);
    let resolver = resolver_with(store, 10);

    assert_eq!(resolver.resolve_or_default(1, Some("uk")).await, "en");
    assert!(resolver.cache().is_empty());
}

#[tokio::test]
async fn test_failed_hint_write_leaves_cache_untouched() {
    let store = Arc::new(CountingStore::default());
    store.fail_writes.store(true, Ordering::SeqCst);
    let resolver = resolver_with(store.clone(), 10);

    assert!(resolver.resolve(2, Some("uk")).await.is_err());
    assert_eq!(resolver.cache().peek(2), None);
}

#[tokio::test]
async fn test_failed_set_locale_keeps_previous_cache_entry() {
    let store = Arc::new(CountingStore::with_pref(2, "en"));
    let resolver = resolver_with(store.clone(), 10);
    resolver.resolve(2, None).await.unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    assert!(resolver.set_locale(2, "uk").await.is_err());
    assert_eq!(resolver.cache().peek(2).as_deref(), Some("en"));
    assert_eq!(resolver.resolve(2, None).await.unwrap(), "en");
}

#[tokio::test]
async fn test_evicted_chat_is_reloaded_from_store() {
    let store = Arc::new(CountingStore::default());
    let resolver = resolver_with(store.clone(), 2);

    resolver.set_locale(1, "uk").await.unwrap();
    resolver.set_locale(2, "en").await.unwrap();
    resolver.set_locale(3, "en").await.unwrap();
    assert_eq!(resolver.cache().peek(1), None);

    let gets_before = store.gets.load(Ordering::SeqCst);
    assert_eq!(resolver.resolve(1, None).await.unwrap(), "uk");
    assert_eq!(store.gets.load(Ordering::SeqCst), gets_before + 1);
}

#[tokio::test]
async fn test_load_reads_supported_locales_from_store() {
    let store = Arc::new(CountingStore::default());
    let resolver = LocaleResolver::load(store, LocaleCache::with_capacity(8).unwrap(), "en")
        .await
        .unwrap();
    let codes: Vec<_> = resolver.supported().iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["en", "uk"]);
    assert_eq!(resolver.default_locale(), "en");
    assert_eq!(resolver.find("uk").unwrap().display_name, "Українська");
}

#[tokio::test]
async fn test_concurrent_same_chat_writes_settle_on_one_value() {
    let store = Arc::new(CountingStore::default());
    let resolver = Arc::new(resolver_with(store.clone(), 10));

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let r = resolver.clone();
            tokio::spawn(async move {
                let code = if i % 2 == 0 { "en" } else { "uk" };
                r.set_locale(11, code).await.unwrap();
            })
        })
        .collect();
    for h in handles {
        h.await.unwrap();
    }

    let cached = resolver.cache().peek(11).unwrap();
    let stored = store.stored(11).unwrap();
    assert!(cached == "en" || cached == "uk");
    assert!(stored == "en" || stored == "uk");
}

#[tokio::test]
async fn test_selection_during_store_read_is_not_overwritten() {
    let store = Arc::new(CountingStore::with_pref(1, "en"));
    let resolver = Arc::new(resolver_with(store.clone(), 10));
    let (read_done, release) = store.hold_next_read();

    let r = resolver.clone();
    let pending = tokio::spawn(async move { r.resolve(1, None).await });
    read_done.await.unwrap();

    resolver.set_locale(1, "uk").await.unwrap();
    release.send(()).unwrap();

    assert_eq!(pending.await.unwrap().unwrap(), "uk");
    assert_eq!(resolver.cache().peek(1), store.stored(1));
    assert_eq!(resolver.resolve(1, None).await.unwrap(), "uk");
}

#[tokio::test]
async fn test_selection_during_hint_adoption_wins() {
    let store = Arc::new(CountingStore::default());
    let resolver = Arc::new(resolver_with(store.clone(), 10));
    let (read_done, release) = store.hold_next_read();

    let r = resolver.clone();
    let pending = tokio::spawn(async move { r.resolve(1, Some("uk")).await });
    read_done.await.unwrap();

    resolver.set_locale(1, "en").await.unwrap();
    release.send(()).unwrap();

    assert_eq!(pending.await.unwrap().unwrap(), "en");
    assert_eq!(store.stored(1).as_deref(), Some("en"));
    assert_eq!(resolver.cache().peek(1).as_deref(), Some("en"));
}

#[tokio::test]
async fn test_concurrent_distinct_chats_respect_capacity() {
    let store = Arc::new(CountingStore::default());
    let resolver = Arc::new(resolver_with(store.clone(), 16));

    let handles: Vec<_> = (0..64)
        .map(|chat| {
            let r = resolver.clone();
            tokio::spawn(async move { r.resolve(chat, Some("uk")).await.unwrap() })
        })
        .collect();
    for h in handles {
        assert_eq!(h.await.unwrap(), "uk");
    }

    assert_eq!(resolver.cache().len(), 16);
    assert_eq!(store.prefs.lock().unwrap().len(), 64);
}
