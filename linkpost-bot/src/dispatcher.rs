//! Message event dispatcher: first link → handler chain → media publisher, posting into the first
//! channel the message mentions, with failures echoed back into the originating channel.

use handler_chain::HandlerChain;
use linkpost_core::{Channel, ChatClient, LinkpostError, Message, Result};
use media_publisher::{MediaPublisher, Publication};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Prefix of every failure notice sent to a channel.
pub const FAILURE_MARKER: &str = "❌";

/// How one inbound message was handled.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// No mentioned target channel or no link in the message; nothing was done.
    Ignored,
    Published(Publication),
    /// Resolution or publishing failed; already reported or logged.
    Failed(LinkpostError),
}

/// Per-message entry point. Shared read-only across message tasks.
pub struct Dispatcher {
    chain: HandlerChain,
    publisher: MediaPublisher,
    client: Arc<dyn ChatClient>,
}

impl Dispatcher {
    pub fn new(chain: HandlerChain, client: Arc<dyn ChatClient>) -> Self {
        Self {
            chain,
            publisher: MediaPublisher::new(client.clone()),
            client,
        }
    }

    pub fn chain(&self) -> &HandlerChain {
        &self.chain
    }

    #[instrument(skip(self, message), fields(message_id = %message.id, channel_id = %message.channel.id))]
    pub async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        let Some(target) = message.target_channel() else {
            debug!("No channel mentioned, ignored");
            return DispatchOutcome::Ignored;
        };
        let Some(url) = message.first_link() else {
            debug!("No link in message, ignored");
            return DispatchOutcome::Ignored;
        };

        match self.process(&target, &url).await {
            Ok(publication) => DispatchOutcome::Published(publication),
            Err(e) => {
                self.report_failure(message, &e).await;
                DispatchOutcome::Failed(e)
            }
        }
    }

    async fn process(&self, target: &Channel, url: &str) -> Result<Publication> {
        info!(url = %url, target_channel = %target.id, "step: intercepted URL");
        let result = self.chain.resolve(url).await?;
        self.publisher.publish(target, result).await
    }

    /// Sends "❌ <message>" to the originating channel when the error has a user message.
    async fn report_failure(&self, message: &Message, err: &LinkpostError) {
        let Some(text) = err.user_message() else {
            info!(error = %err, "step: failure not shown to user");
            return;
        };

        info!(error = %err, "bail: {}", text);
        let notice = format!("{} {}", FAILURE_MARKER, text);
        if let Err(e) = self.client.send_message(&message.channel, &notice).await {
            error!(error = %e, "Failed to send failure notice");
        }
    }
}
