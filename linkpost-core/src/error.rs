//! Error types for linkpost.
//!
//! [`LinkpostError`] is the top-level error; [`HandlerError`] covers handler-chain resolution and
//! [`PublishError`] covers media post / reply submission. Whether a failure is shown to the user is
//! decided by [`LinkpostError::user_message`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkpostError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No URL present")]
    NoUrl,

    #[error("No handler matched this URL")]
    NoMatch,

    #[error("Handler '{handler}' failed: {}", .message.as_deref().unwrap_or("<no message>"))]
    Fault {
        handler: String,
        message: Option<String>,
    },
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to create media post: {0}")]
    Post(String),

    #[error("Media post {post_id} created, but the reply with additional media failed: {reason}")]
    Reply { post_id: i64, reason: String },
}

impl LinkpostError {
    /// Text to echo back into the originating channel, or `None` when the failure is log-only.
    ///
    /// "No URL" and "no handler matched" stay silent so ordinary links don't produce noise; a
    /// handler fault is only shown when the handler supplied a message.
    pub fn user_message(&self) -> Option<String> {
        match self {
            LinkpostError::Handler(HandlerError::NoUrl | HandlerError::NoMatch) => None,
            LinkpostError::Handler(HandlerError::Fault { message, .. }) => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            LinkpostError::Publish(e) => Some(e.to_string()),
            other => Some(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkpostError>;
