//! Shared test doubles: a recording [`ChatClient`] and scripted [`Handler`]s.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use linkpost_core::{
    Channel, ChatClient, Document, Handler, HandlerOutcome, LinkpostError, MediaPost, MediaReply,
    Message, NewMediaPost, NewMediaReply, Node, Result, UploadedAsset,
};

/// Every call the bot made against the platform, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send { channel: String, text: String },
    Upload { src: String },
    Post { channel: String, post: NewMediaPost },
    Reply { post_id: i64, reply: NewMediaReply },
}

#[derive(Default)]
pub struct MockClient {
    pub failing_uploads: HashSet<String>,
    pub fail_post: bool,
    pub fail_reply: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl MockClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_uploads(srcs: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            failing_uploads: srcs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { channel, text } => Some((channel, text)),
                _ => None,
            })
            .collect()
    }

    pub fn posts(&self) -> Vec<(String, NewMediaPost)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Post { channel, post } => Some((channel, post)),
                _ => None,
            })
            .collect()
    }

    pub fn replies(&self) -> Vec<(i64, NewMediaReply)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Reply { post_id, reply } => Some((post_id, reply)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Stored URL the mock platform hands back for an uploaded source.
pub fn uploaded(src: &str) -> String {
    format!("https://media.test/stored/{}", src.rsplit('/').next().unwrap_or(src))
}

pub const POST_ID: i64 = 501;

#[async_trait]
impl ChatClient for MockClient {
    async fn send_message(&self, channel: &Channel, text: &str) -> Result<()> {
        self.record(Call::Send {
            channel: channel.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn upload_media(&self, src: &str) -> Result<UploadedAsset> {
        self.record(Call::Upload { src: src.to_string() });
        if self.failing_uploads.contains(src) {
            return Err(LinkpostError::Transport(format!("upload of {src} rejected")));
        }
        Ok(UploadedAsset::new(uploaded(src)))
    }

    async fn create_media_post(&self, channel: &Channel, post: &NewMediaPost) -> Result<MediaPost> {
        self.record(Call::Post {
            channel: channel.id.clone(),
            post: post.clone(),
        });
        if self.fail_post {
            return Err(LinkpostError::Transport("media returned 500 Internal Server Error".to_string()));
        }
        Ok(MediaPost {
            id: POST_ID,
            channel_id: channel.id.clone(),
            team_id: None,
            title: post.title.clone(),
            description: post.description.clone(),
            src: post.src.clone(),
            tags: post.tags.clone(),
            media_type: post.media_type.clone(),
        })
    }

    async fn create_media_reply(&self, post: &MediaPost, reply: &NewMediaReply) -> Result<MediaReply> {
        self.record(Call::Reply {
            post_id: post.id,
            reply: reply.clone(),
        });
        if self.fail_reply {
            return Err(LinkpostError::Transport("replies returned 403 Forbidden".to_string()));
        }
        Ok(MediaReply {
            id: reply.id as i64,
            post_id: Some(post.id),
            content_id: Some(post.id),
        })
    }
}

/// Handler returning a fixed outcome and counting invocations.
pub struct ScriptedHandler {
    pub id: String,
    pub outcome: HandlerOutcome,
    pub calls: AtomicUsize,
}

impl ScriptedHandler {
    pub fn new(id: &str, outcome: HandlerOutcome) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler for ScriptedHandler {
    fn id(&self) -> &str {
        &self.id
    }

    async fn handle(&self, _url: &str) -> HandlerOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Channel every test message mentions unless stated otherwise.
pub const TARGET: &str = "gallery";

/// Message in channel "origin", mentioning [`TARGET`], whose single paragraph contains the links.
pub fn message_with_links(links: &[&str]) -> Message {
    Message {
        mentioned_channels: vec![TARGET.to_string()],
        ..message_without_mention(links)
    }
}

/// Same as [`message_with_links`] but with no channel mention.
pub fn message_without_mention(links: &[&str]) -> Message {
    let mut nodes = vec![Node::text("look at this ")];
    nodes.extend(links.iter().map(|l| Node::link(*l, *l)));
    Message {
        id: "msg-1".to_string(),
        channel: Channel::new("origin"),
        author_id: Some("user-1".to_string()),
        document: Document::new(vec![Node::paragraph(nodes)]),
        mentioned_channels: Vec::new(),
        created_at: Utc::now(),
    }
}
