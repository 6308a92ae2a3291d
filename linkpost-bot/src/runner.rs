//! Event loop: reads newline-delimited message events and dispatches each on its own task.
//! 与外部交互：事件源为任意 AsyncBufRead（stdin 或文件），每条消息交给 Dispatcher 处理。

use anyhow::Result;
use guilded_client::parse_event;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{error, info, instrument, warn};

use crate::dispatcher::{DispatchOutcome, Dispatcher};

/// Totals for one run, returned once the event source is exhausted and all tasks finished.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub received: usize,
    pub malformed: usize,
    pub ignored: usize,
    pub published: usize,
    pub failed: usize,
}

/// Consumes events until EOF. Messages are processed concurrently with no ordering guarantee.
#[instrument(skip(dispatcher, events))]
pub async fn run<R>(dispatcher: Arc<Dispatcher>, events: R) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = RunSummary::default();
    let mut tasks = JoinSet::new();
    let mut lines = events.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let message = match parse_event(&line) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Skipping malformed event");
                summary.malformed += 1;
                continue;
            }
        };
        summary.received += 1;
        info!(
            message_id = %message.id,
            channel_id = %message.channel.id,
            "Received message"
        );

        let dispatcher = dispatcher.clone();
        tasks.spawn(async move { dispatcher.dispatch(&message).await });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(DispatchOutcome::Ignored) => summary.ignored += 1,
            Ok(DispatchOutcome::Published(_)) => summary.published += 1,
            Ok(DispatchOutcome::Failed(_)) => summary.failed += 1,
            Err(e) => {
                error!(error = %e, "Message task panicked");
                summary.failed += 1;
            }
        }
    }

    info!(?summary, "Event source exhausted");
    Ok(summary)
}
