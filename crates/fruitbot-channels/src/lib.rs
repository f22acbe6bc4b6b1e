//! # fruitbot-channels
//!
//! Messaging platform integrations for fruitbot.

pub mod telegram;
pub(crate) mod utils;
