//! # media-publisher
//!
//! Turns a [`HandlerResult`] into a media post: every media URL is uploaded in order, the first
//! successful upload becomes the post, and any further successful uploads are attached as a
//! single threaded reply made of captioned image blocks.

use linkpost_core::{
    Channel, ChatClient, Document, HandlerResult, LinkpostError, MediaPost, MediaReply,
    NewMediaPost, NewMediaReply, Node, PublishError, Result, UploadedAsset,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Platform limit on media post titles, in characters.
pub const TITLE_LIMIT: usize = 80;

/// Type tag sent with every media post.
pub const MEDIA_TYPE: &str = "image";

/// Reply ids are drawn from `0..REPLY_ID_RANGE`.
pub const REPLY_ID_RANGE: u32 = 1 << 28;

/// What a publish run produced.
#[derive(Debug)]
pub enum Publication {
    /// No upload succeeded; nothing was posted.
    Nothing { failed_uploads: usize },
    /// A media post was created, with a reply when more than one upload succeeded.
    Posted {
        post: MediaPost,
        reply: Option<MediaReply>,
        failed_uploads: usize,
    },
}

/// Post orchestrator. Holds the shared platform client.
#[derive(Clone)]
pub struct MediaPublisher {
    client: Arc<dyn ChatClient>,
}

impl MediaPublisher {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Uploads `result.media` and posts it into `channel`.
    ///
    /// Upload failures are logged and skipped. A failed post aborts before any reply; a failed
    /// reply is returned as an error but the post stays up.
    #[instrument(skip(self, result), fields(channel_id = %channel.id, media = result.media.len()))]
    pub async fn publish(&self, channel: &Channel, result: HandlerResult) -> Result<Publication> {
        let (assets, errors) = self.upload_all(&result.media).await;

        if !errors.is_empty() {
            warn!(count = errors.len(), "{} upload errors encountered", errors.len());
            for (src, e) in &errors {
                warn!(src = %src, error = %e, "Upload failed");
            }
        }

        let mut assets = assets.into_iter();
        let Some(primary) = assets.next() else {
            info!("step: no media to upload, stop");
            return Ok(Publication::Nothing {
                failed_uploads: errors.len(),
            });
        };
        let rest: Vec<UploadedAsset> = assets.collect();

        let new_post = build_post(&result, &primary);
        let post = self
            .client
            .create_media_post(channel, &new_post)
            .await
            .map_err(|e| PublishError::Post(e.to_string()))?;
        info!(post_id = post.id, "step: media post created");

        let reply = if rest.is_empty() {
            None
        } else {
            let new_reply = build_reply(&rest);
            let reply = self
                .client
                .create_media_reply(&post, &new_reply)
                .await
                .map_err(|e| PublishError::Reply {
                    post_id: post.id,
                    reason: e.to_string(),
                })?;
            info!(
                post_id = post.id,
                reply_id = reply.id,
                items = rest.len(),
                "step: media reply created"
            );
            Some(reply)
        };

        Ok(Publication::Posted {
            post,
            reply,
            failed_uploads: errors.len(),
        })
    }

    /// Uploads sequentially in source order; returns successes and (src, error) failures.
    async fn upload_all<'a>(
        &self,
        media: &'a [String],
    ) -> (Vec<UploadedAsset>, Vec<(&'a str, LinkpostError)>) {
        let mut assets = Vec::with_capacity(media.len());
        let mut errors = Vec::new();

        for src in media {
            match self.client.upload_media(src).await {
                Ok(asset) => assets.push(asset),
                Err(e) => errors.push((src.as_str(), e)),
            }
        }

        (assets, errors)
    }
}

/// Truncates to at most [`TITLE_LIMIT`] characters.
pub fn truncate_title(title: &str) -> String {
    title.chars().take(TITLE_LIMIT).collect()
}

fn build_post(result: &HandlerResult, primary: &UploadedAsset) -> NewMediaPost {
    NewMediaPost {
        additional_info: serde_json::json!({}),
        description: result.description.clone(),
        src: primary.url.clone(),
        tags: result.tags.clone(),
        title: truncate_title(&result.title),
        media_type: MEDIA_TYPE.to_string(),
    }
}

/// One captioned image block per asset, in upload order, under a fresh reply id.
pub fn build_reply(assets: &[UploadedAsset]) -> NewMediaReply {
    let nodes = assets
        .iter()
        .map(|a| Node::captioned_image(a.url.as_str(), ""))
        .collect();
    NewMediaReply {
        id: rand::random_range(0..REPLY_ID_RANGE),
        document: Document::new(nodes),
    }
}
