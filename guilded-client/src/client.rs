//! Guilded REST client implementing [`linkpost_core::ChatClient`]. Production code talks to the
//! Guilded API; tests point it at a mock server or substitute another ChatClient impl.

use async_trait::async_trait;
use linkpost_core::{
    Channel, ChatClient, Document, LinkpostError, MediaPost, MediaReply, NewMediaPost,
    NewMediaReply, Result, UploadedAsset,
};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::GuildedConfig;

const UPLOAD_MEDIA_TYPE: &str = "ContentMedia";
const UPLOAD_TRACKING_ID: &str = "r-0000000-0000000";
const REPLY_CONTENT_TYPE: &str = "team_media";

/// Masks a token for safe logging: first 7 chars + "***" + last 4 chars; "***" if length <= 11.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'a> {
    dynamic_media_type_id: &'static str,
    media_info: MediaInfo<'a>,
    upload_tracking_id: &'static str,
}

#[derive(Serialize)]
struct MediaInfo<'a> {
    src: &'a str,
}

#[derive(Serialize)]
struct ChatMessageRequest<'a> {
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    channel_id: &'a str,
    content_id: i64,
    content_type: &'static str,
    game_id: Option<i64>,
    id: u32,
    is_content_reply: bool,
    message: ReplyMessage<'a>,
    post_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<&'a str>,
}

#[derive(Serialize)]
struct ReplyMessage<'a> {
    object: &'static str,
    document: &'a Document,
}

/// REST client sharing one authenticated HTTP session across all calls.
#[derive(Clone)]
pub struct GuildedClient {
    http: reqwest::Client,
    api_url: String,
    media_url: String,
}

impl GuildedClient {
    /// Builds the client; the session token is sent as a default header on every request.
    pub fn new(config: &GuildedConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| LinkpostError::Config(format!("Invalid GUILDED_TOKEN: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LinkpostError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            api_url = %config.api_url,
            media_url = %config.media_url,
            token = %mask_token(&config.token),
            "Guilded client ready"
        );

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            media_url: config.media_url.trim_end_matches('/').to_string(),
        })
    }

    /// POSTs a JSON body and decodes the JSON response; non-2xx becomes a Transport error.
    async fn post_json<B, T>(&self, endpoint: &str, url: String, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(endpoint = %endpoint, url = %url, "POST");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| LinkpostError::Transport(format!("{} request failed: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LinkpostError::Transport(format!(
                "{} returned {}: {}",
                endpoint, status, text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LinkpostError::Transport(format!("{} sent a malformed response: {}", endpoint, e)))
    }
}

#[async_trait]
impl ChatClient for GuildedClient {
    #[instrument(skip(self, text), fields(channel_id = %channel.id))]
    async fn send_message(&self, channel: &Channel, text: &str) -> Result<()> {
        let url = format!("{}/channels/{}/messages", self.api_url, channel.id);
        let _: serde_json::Value = self
            .post_json("messages", url, &ChatMessageRequest { content: text })
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn upload_media(&self, src: &str) -> Result<UploadedAsset> {
        let url = format!("{}/media/upload", self.media_url);
        let body = UploadRequest {
            dynamic_media_type_id: UPLOAD_MEDIA_TYPE,
            media_info: MediaInfo { src },
            upload_tracking_id: UPLOAD_TRACKING_ID,
        };
        self.post_json("media/upload", url, &body).await
    }

    #[instrument(skip(self, post), fields(channel_id = %channel.id))]
    async fn create_media_post(&self, channel: &Channel, post: &NewMediaPost) -> Result<MediaPost> {
        let url = format!("{}/channels/{}/media", self.api_url, channel.id);
        self.post_json("media", url, post).await
    }

    #[instrument(skip(self, post, reply), fields(post_id = post.id, reply_id = reply.id))]
    async fn create_media_reply(
        &self,
        post: &MediaPost,
        reply: &NewMediaReply,
    ) -> Result<MediaReply> {
        let url = format!(
            "{}/content/{}/{}/replies",
            self.api_url, REPLY_CONTENT_TYPE, post.id
        );
        let body = ReplyRequest {
            channel_id: &post.channel_id,
            content_id: post.id,
            content_type: REPLY_CONTENT_TYPE,
            game_id: None,
            id: reply.id,
            is_content_reply: true,
            message: ReplyMessage {
                object: "value",
                document: &reply.document,
            },
            post_id: post.id,
            team_id: post.team_id.as_deref(),
        };
        self.post_json("replies", url, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guilded_client_new() {
        let _client = GuildedClient::new(&GuildedConfig::with_token("dummy_token".to_string())).unwrap();
    }

    #[test]
    fn test_invalid_token_header() {
        let config = GuildedConfig::with_token("bad\ntoken".to_string());
        assert!(matches!(GuildedClient::new(&config), Err(LinkpostError::Config(_))));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token("gld-abcdefghijklmnop"), "gld-abc***mnop");
    }
}
