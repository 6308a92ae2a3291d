//! Static handler registry: maps configured ids to handler constructors.

use linkpost_core::{Handler, LinkpostError, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::direct::DirectMediaHandler;
use crate::opengraph::OpenGraphHandler;

const AVAILABLE: &[&str] = &[DirectMediaHandler::ID, OpenGraphHandler::ID];

/// Ids of every handler this build knows how to construct.
pub fn available() -> &'static [&'static str] {
    AVAILABLE
}

/// Which handlers to run, in order, and each one's config block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerSettings {
    pub order: Vec<String>,
    pub blocks: HashMap<String, Value>,
}

impl HandlerSettings {
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: order.into_iter().map(Into::into).collect(),
            blocks: HashMap::new(),
        }
    }

    /// Parses a comma-separated id list, e.g. "direct, opengraph".
    pub fn from_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn with_block(mut self, id: impl Into<String>, block: Value) -> Self {
        self.blocks.insert(id.into(), block);
        self
    }

    /// Config block for `id`; `{}` when none was given.
    pub fn block(&self, id: &str) -> Value {
        self.blocks.get(id).cloned().unwrap_or_else(|| json!({}))
    }

    /// Configured ids that have no constructor.
    pub fn unknown_ids(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(String::as_str)
            .filter(|id| !AVAILABLE.contains(id))
            .collect()
    }
}

/// Constructs one handler by id.
pub fn create_handler(id: &str, block: Value) -> Result<Arc<dyn Handler>> {
    let handler: Arc<dyn Handler> = match id {
        DirectMediaHandler::ID => Arc::new(DirectMediaHandler::from_config(block)?),
        OpenGraphHandler::ID => Arc::new(OpenGraphHandler::from_config(block)?),
        other => {
            return Err(LinkpostError::Config(format!(
                "unknown handler '{}' (available: {})",
                other,
                AVAILABLE.join(", ")
            )))
        }
    };
    Ok(handler)
}

/// Constructs every configured handler in configured order.
pub fn build_handlers(settings: &HandlerSettings) -> Result<Vec<Arc<dyn Handler>>> {
    settings
        .order
        .iter()
        .map(|id| -> Result<Arc<dyn Handler>> {
            let handler = create_handler(id, settings.block(id))?;
            info!(handler = %handler.id(), "Loaded handler '{}'", handler.id());
            Ok(handler)
        })
        .collect()
}
