//! Bot configuration: GuildedConfig (transport) + BaseConfig (logging, handler roster).

mod base;
mod bot_config;


pub use base::{load_handler_settings, BaseConfig, DEFAULT_HANDLERS};
pub use bot_config::BotConfig;
