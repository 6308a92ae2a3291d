//! Base config: logging and the handler roster. Loaded from env.

use anyhow::{Context, Result};
use media_handlers::HandlerSettings;
use serde_json::Value;
use std::env;
use std::path::Path;

pub const DEFAULT_HANDLERS: &str = "direct,opengraph";

/// Base config: log file and which handlers run, in order, with their config blocks.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// HANDLER_CONFIG_FILE, if any
    pub handler_config_file: Option<String>,
    /// HANDLERS order plus per-handler blocks from HANDLER_CONFIG_FILE
    pub handlers: HandlerSettings,
}

impl BaseConfig {
    /// Load from environment variables.
    pub fn load() -> Result<Self> {
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        let handler_list = env::var("HANDLERS").unwrap_or_else(|_| DEFAULT_HANDLERS.to_string());
        let handler_config_file = env::var("HANDLER_CONFIG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let handlers = load_handler_settings(&handler_list, handler_config_file.as_deref())?;

        Ok(Self {
            log_file,
            handler_config_file,
            handlers,
        })
    }

    /// Validate config (every configured handler id must be registered).
    pub fn validate(&self) -> Result<()> {
        if self.handlers.order.is_empty() {
            anyhow::bail!("HANDLERS is empty; at least one handler is required");
        }
        let unknown = self.handlers.unknown_ids();
        if !unknown.is_empty() {
            anyhow::bail!(
                "HANDLERS contains unknown handler(s): {} (available: {})",
                unknown.join(", "),
                media_handlers::available().join(", ")
            );
        }
        Ok(())
    }
}

/// Builds [`HandlerSettings`] from a comma-separated id list and an optional JSON file mapping
/// handler id to its config block.
pub fn load_handler_settings(list: &str, config_file: Option<&str>) -> Result<HandlerSettings> {
    let mut settings = HandlerSettings::from_list(list);

    if let Some(path) = config_file {
        let raw = std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Read HANDLER_CONFIG_FILE {}", path))?;
        let blocks: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Parse HANDLER_CONFIG_FILE {}", path))?;
        let Value::Object(blocks) = blocks else {
            anyhow::bail!("HANDLER_CONFIG_FILE {} must contain a JSON object keyed by handler id", path);
        };
        for (id, block) in blocks {
            settings = settings.with_block(id, block);
        }
    }

    Ok(settings)
}
