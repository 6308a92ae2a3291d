//! CLI parser.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "linkpost")]
#[command(about = "Repost linked media as Guilded media posts: run, resolve, handlers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Commands {
    /// Run the bot over newline-delimited message events (token can override GUILDED_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Event file; reads stdin when omitted.
        #[arg(short, long)]
        events: Option<PathBuf>,
    },
    /// Resolve a URL through the configured handler chain and print the result; posts nothing.
    Resolve { url: String },
    /// List registered handler ids.
    Handlers,
}
