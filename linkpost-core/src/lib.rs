//! # linkpost-core
//!
//! Core types and traits for the link-to-media bot: [`ChatClient`], [`Handler`], message document
//! model, link extraction, errors, and tracing initialization. Transport-agnostic; used by
//! handler-chain, media-publisher, media-handlers and guilded-client.

pub mod client;
pub mod document;
pub mod error;
pub mod handler;
pub mod links;
pub mod logger;
pub mod types;

pub use client::ChatClient;
pub use document::{Document, Leaf, Node};
pub use error::{HandlerError, LinkpostError, PublishError, Result};
pub use handler::{Handler, HandlerFault, HandlerOutcome};
pub use links::{extract_links, first_link};
pub use logger::init_tracing;
pub use types::{
    Channel, HandlerResult, MediaPost, MediaReply, Message, NewMediaPost, NewMediaReply,
    ToCoreMessage, UploadedAsset,
};
