//! Chat platform abstraction for sending messages, uploading media and creating media posts.
//!
//! [`ChatClient`] is transport-agnostic; `guilded-client` implements it over the Guilded REST API.
//! One instance is shared (behind `Arc`) by every component that talks to the platform.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Channel, MediaPost, MediaReply, NewMediaPost, NewMediaReply, UploadedAsset};

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends a plain text message to the channel.
    async fn send_message(&self, channel: &Channel, text: &str) -> Result<()>;

    /// Ingests the media at `src` into the platform's media store. Single attempt, no retry.
    async fn upload_media(&self, src: &str) -> Result<UploadedAsset>;

    /// Creates a media post in the channel.
    async fn create_media_post(&self, channel: &Channel, post: &NewMediaPost) -> Result<MediaPost>;

    /// Attaches a threaded reply to an existing media post.
    async fn create_media_reply(&self, post: &MediaPost, reply: &NewMediaReply)
        -> Result<MediaReply>;
}
