//! # fruitbot-core
//!
//! Core types, traits, configuration, and error handling for fruitbot.

pub mod config;
pub mod error;
pub mod locale;
pub mod message;
pub mod traits;

pub use config::shellexpand;
