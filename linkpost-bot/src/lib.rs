//! # linkpost-bot
//!
//! Application layer: CLI parser, config loading, handler chain assembly, the message
//! [`Dispatcher`], and the event runner used by the `linkpost` binary.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod runner;

use anyhow::Result;
use guilded_client::GuildedClient;
use handler_chain::HandlerChain;
use media_handlers::HandlerSettings;
use std::sync::Arc;
use tokio::io::AsyncBufRead;

pub use config::{BaseConfig, BotConfig};
pub use dispatcher::{DispatchOutcome, Dispatcher, FAILURE_MARKER};
pub use runner::{run, RunSummary};

/// Builds the handler chain from configured ids and blocks, in configured order.
pub fn build_chain(settings: &HandlerSettings) -> Result<HandlerChain> {
    let handlers = media_handlers::build_handlers(settings)?;
    Ok(HandlerChain::from_handlers(handlers))
}

/// Wires client, chain and dispatcher from config, then runs until `events` is exhausted.
pub async fn run_bot<R>(config: BotConfig, events: R) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
{
    let client = Arc::new(GuildedClient::new(config.guilded())?);
    let chain = build_chain(config.handlers())?;
    tracing::info!(handlers = ?chain.handler_ids(), "Handler chain ready");

    let dispatcher = Arc::new(Dispatcher::new(chain, client));
    run(dispatcher, events).await
}
