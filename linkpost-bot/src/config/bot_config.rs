//! BotConfig: GuildedConfig (transport) + BaseConfig (logging, handlers). Use load() for env-based loading.

use anyhow::Result;
use guilded_client::GuildedConfig;
use media_handlers::HandlerSettings;

use super::BaseConfig;

/// Bot config: transport + base. Use BotConfig::load() for env-based loading.
pub struct BotConfig {
    pub guilded: GuildedConfig,
    pub base: BaseConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides GUILDED_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let guilded = GuildedConfig::from_env(token)?;
        let base = BaseConfig::load()?;
        Ok(Self { guilded, base })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.guilded.validate()?;
        self.base.validate()
    }

    pub fn guilded(&self) -> &GuildedConfig {
        &self.guilded
    }
    pub fn log_file(&self) -> Option<&str> {
        self.base.log_file.as_deref()
    }
    pub fn handlers(&self) -> &HandlerSettings {
        &self.base.handlers
    }
}
