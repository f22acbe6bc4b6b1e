//! # fruitbot-locale
//!
//! Decides which locale every response is rendered in.
//!
//! Lookup order: in-process LRU cache, then the persisted preference, then the
//! client-advertised language (adopted and persisted on first sight if
//! supported), then the configured default.

pub mod cache;
pub mod resolver;

pub use cache::LocaleCache;
pub use resolver::LocaleResolver;
