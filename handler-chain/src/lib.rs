//! # Handler chain
//!
//! Resolves a URL through an ordered list of content handlers. The first handler that matches
//! wins and later handlers are never tried; a declining handler passes the URL on; a faulting
//! handler stops the chain and its error is returned as-is.

use linkpost_core::{Handler, HandlerError, HandlerOutcome, HandlerResult, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Ordered, immutable-after-startup list of handlers.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain; resolving against it always ends in no-match.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Builds a chain from handlers already in the configured order.
    pub fn from_handlers(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self { handlers }
    }

    /// Appends a handler (tried after every handler added before it).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler ids in chain order.
    pub fn handler_ids(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.id()).collect()
    }

    /// Tries each handler in order until one matches or faults.
    #[instrument(skip(self))]
    pub async fn resolve(&self, url: &str) -> Result<HandlerResult> {
        if url.trim().is_empty() {
            return Err(HandlerError::NoUrl.into());
        }

        info!(url = %url, handlers = self.handlers.len(), "step: resolve started");

        for handler in &self.handlers {
            let handler_id = handler.id();
            info!(handler = %handler_id, "step: trying handler");

            match handler.handle(url).await {
                HandlerOutcome::Matched(result) => {
                    info!(
                        handler = %handler_id,
                        media = result.media.len(),
                        "step: handler matched, chain stopped"
                    );
                    return Ok(result);
                }
                HandlerOutcome::Declined => {
                    debug!(handler = %handler_id, "Handler declined");
                    continue;
                }
                HandlerOutcome::Faulted(fault) => {
                    warn!(
                        handler = %handler_id,
                        message = ?fault.message,
                        "step: handler faulted, chain aborted"
                    );
                    return Err(HandlerError::Fault {
                        handler: handler_id.to_string(),
                        message: fault.message,
                    }
                    .into());
                }
            }
        }

        info!(url = %url, "step: no handlers discovered for this URL");
        Err(HandlerError::NoMatch.into())
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs
