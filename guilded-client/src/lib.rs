//! # guilded-client
//!
//! Guilded transport layer: inbound event adapters, [`linkpost_core::ChatClient`] implementation
//! over the REST API, and minimal transport config. No handler or publishing logic.

mod adapters;
mod client;
mod config;

pub use adapters::{parse_event, GuildedMessage, GuildedMessageWrapper, MessageEvent};
pub use client::{mask_token, GuildedClient};
pub use config::GuildedConfig;
