//! linkpost CLI: run the bot over an event stream, dry-run the handler chain on a URL, list handlers.
//! Config from env (.env supported) and optional CLI args.

use anyhow::{Context, Result};
use clap::Parser;
use linkpost_bot::cli::{Cli, Commands};
use linkpost_bot::{build_chain, run_bot, BaseConfig, BotConfig};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, events } => {
            let config = BotConfig::load(token)?;
            config.validate()?;
            linkpost_core::init_tracing(config.log_file())?;

            let reader = open_events(events).await?;
            let summary = run_bot(config, reader).await?;
            println!(
                "Received: {}, Published: {}, Ignored: {}, Failed: {}, Malformed: {}",
                summary.received, summary.published, summary.ignored, summary.failed, summary.malformed
            );
            Ok(())
        }
        Commands::Resolve { url } => handle_resolve(&url).await,
        Commands::Handlers => {
            for id in media_handlers::available() {
                println!("{}", id);
            }
            Ok(())
        }
    }
}

async fn open_events(path: Option<PathBuf>) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    Ok(match path {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Open event file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    })
}

/// Handle the resolve command: only the handler chain runs, no Guilded token needed.
async fn handle_resolve(url: &str) -> Result<()> {
    let base = BaseConfig::load()?;
    base.validate()?;
    linkpost_core::init_tracing(base.log_file.as_deref())?;

    let chain = build_chain(&base.handlers)?;
    match chain.resolve(url).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e),
    }
}
