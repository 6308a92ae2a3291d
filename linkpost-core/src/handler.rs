//! Handler trait: a pluggable capability that inspects a URL.

use async_trait::async_trait;

use crate::types::HandlerResult;

/// Outcome of one handler attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The URL is this handler's and it produced media.
    Matched(HandlerResult),
    /// Not this handler's URL; try the next one.
    Declined,
    /// The URL was this handler's but processing broke; stops the chain.
    Faulted(HandlerFault),
}

/// Failure raised by a handler. `message` is shown to the user when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFault {
    pub message: Option<String>,
}

impl HandlerFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// A fault with nothing to tell the user; only logged.
    pub fn silent() -> Self {
        Self { message: None }
    }
}

impl HandlerOutcome {
    pub fn faulted(message: impl Into<String>) -> Self {
        HandlerOutcome::Faulted(HandlerFault::new(message))
    }
}

/// Content handler. Implementations are selected by [`Handler::id`] at startup.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Registry identifier, e.g. "opengraph".
    fn id(&self) -> &str;

    async fn handle(&self, url: &str) -> HandlerOutcome;
}
