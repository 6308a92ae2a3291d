//! Direct media handler: the URL itself points at an image or video file.

use async_trait::async_trait;
use linkpost_core::{Handler, HandlerOutcome, HandlerResult, LinkpostError, Result};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "mp4", "webm"];

/// Config block for the `direct` handler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DirectMediaConfig {
    /// File extensions (without dot, case-insensitive) that count as media.
    pub extensions: Vec<String>,
    /// Tags attached to every post this handler produces.
    pub tags: Vec<String>,
}

impl Default for DirectMediaConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            tags: Vec::new(),
        }
    }
}

/// Matches URLs whose path ends in a media file extension and posts the URL as-is.
pub struct DirectMediaHandler {
    config: DirectMediaConfig,
}

impl DirectMediaHandler {
    pub const ID: &'static str = "direct";

    pub fn new(config: DirectMediaConfig) -> Self {
        let extensions = config
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        Self {
            config: DirectMediaConfig { extensions, ..config },
        }
    }

    /// Builds the handler from its JSON config block (`{}` for defaults).
    pub fn from_config(block: Value) -> Result<Self> {
        let config: DirectMediaConfig = serde_json::from_value(block)
            .map_err(|e| LinkpostError::Config(format!("handler '{}': {}", Self::ID, e)))?;
        Ok(Self::new(config))
    }

    /// Last path segment when its extension is a configured media extension.
    fn media_file_name(&self, url: &Url) -> Option<String> {
        let name = url.path_segments()?.last()?.to_string();
        let (_, ext) = name.rsplit_once('.')?;
        let ext = ext.to_lowercase();
        self.config
            .extensions
            .iter()
            .any(|e| *e == ext)
            .then_some(name)
    }
}

#[async_trait]
impl Handler for DirectMediaHandler {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn handle(&self, url: &str) -> HandlerOutcome {
        let parsed = match Url::parse(url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => u,
            _ => return HandlerOutcome::Declined,
        };

        let Some(file_name) = self.media_file_name(&parsed) else {
            debug!(url = %url, "Not a direct media link");
            return HandlerOutcome::Declined;
        };

        let result = HandlerResult::new(vec![url.to_string()])
            .with_title(file_name)
            .with_tags(self.config.tags.iter().cloned());
        HandlerOutcome::Matched(result)
    }
}
