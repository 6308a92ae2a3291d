//! Core types: channel, inbound message, handler result, and media post / reply payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Document;
use crate::links;

/// Chat channel identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
}

impl Channel {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// An inbound chat message with its structured body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel: Channel,
    pub author_id: Option<String>,
    pub document: Document,
    /// Channels mentioned in the body, in order; the first one is where media gets posted.
    pub mentioned_channels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// First hyperlink in the body.
    pub fn first_link(&self) -> Option<String> {
        links::first_link(&self.document)
    }

    /// Channel the media post goes to: the first mentioned channel. `None` when the message
    /// mentions no channel, in which case it is not for the bot.
    pub fn target_channel(&self) -> Option<Channel> {
        self.mentioned_channels.first().map(Channel::new)
    }
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Output of a handler that recognised a URL: media to upload plus display metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResult {
    pub media: Vec<String>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl HandlerResult {
    pub fn new(media: Vec<String>) -> Self {
        Self {
            media,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds tags, skipping any already present.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }
}

/// Platform reference to an uploaded media item. Only `url` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UploadedAsset {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: Map::new(),
        }
    }
}

/// Request body for creating a media post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaPost {
    pub additional_info: Value,
    pub description: String,
    pub src: String,
    pub tags: Vec<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// A created media post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPost {
    pub id: i64,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type", default)]
    pub media_type: String,
}

/// A threaded reply to be attached to a media post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMediaReply {
    /// Client-chosen id; only needs to avoid accidental collisions.
    pub id: u32,
    pub document: Document,
}

/// A created threaded reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReply {
    pub id: i64,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub content_id: Option<i64>,
}
