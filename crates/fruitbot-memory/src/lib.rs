//! # fruitbot-memory
//!
//! Persistent locale preferences for fruitbot (SQLite-backed).

pub mod store;

pub use store::Store;
