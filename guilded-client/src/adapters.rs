//! Adapters from Guilded wire types to linkpost_core types.
//! Depends only on the inbound event JSON shape and linkpost_core type definitions.

use chrono::{DateTime, Utc};
use linkpost_core::{Channel, Document, LinkpostError, Message, Result, ToCoreMessage};
use serde::Deserialize;

/// Message-creation event as delivered by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEvent {
    pub message: GuildedMessage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildedMessage {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub content: GuildedContent,
    #[serde(default)]
    pub mentions: GuildedMentions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildedContent {
    #[serde(default)]
    pub document: Document,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuildedMentions {
    #[serde(default)]
    pub channels: Vec<ChannelRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRef {
    pub id: String,
}

/// Wraps a Guilded message for conversion to core [`Message`].
pub struct GuildedMessageWrapper<'a>(pub &'a GuildedMessage);

impl<'a> ToCoreMessage for GuildedMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.clone(),
            channel: Channel::new(self.0.channel_id.clone()),
            author_id: self.0.created_by.clone(),
            document: self.0.content.document.clone(),
            mentioned_channels: self.0.mentions.channels.iter().map(|c| c.id.clone()).collect(),
            created_at: self.0.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Parses one inbound event (JSON) into a core [`Message`].
pub fn parse_event(raw: &str) -> Result<Message> {
    let event: MessageEvent = serde_json::from_str(raw)
        .map_err(|e| LinkpostError::Transport(format!("Malformed message event: {}", e)))?;
    Ok(GuildedMessageWrapper(&event.message).to_core())
}
