//! Integration tests for [`media_publisher::MediaPublisher`].
//!
//! Uses a recording [`ChatClient`] whose uploads fail for configured sources and whose post /
//! reply endpoints can be made to fail.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linkpost_core::{
    Channel, ChatClient, HandlerResult, LinkpostError, MediaPost, MediaReply, NewMediaPost,
    NewMediaReply, PublishError, Result, UploadedAsset,
};
use media_publisher::{MediaPublisher, Publication, REPLY_ID_RANGE};

#[derive(Default)]
struct RecordingClient {
    failing_uploads: HashSet<String>,
    fail_post: bool,
    fail_reply: bool,
    uploads: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, NewMediaPost)>>,
    replies: Mutex<Vec<(i64, NewMediaReply)>>,
}

impl RecordingClient {
    fn failing(srcs: &[&str]) -> Self {
        Self {
            failing_uploads: srcs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

fn uploaded(src: &str) -> String {
    format!("https://cdn.example/{}", src.rsplit('/').next().unwrap_or(src))
}

#[async_trait]
impl ChatClient for RecordingClient {
    async fn send_message(&self, _channel: &Channel, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn upload_media(&self, src: &str) -> Result<UploadedAsset> {
        self.uploads.lock().unwrap().push(src.to_string());
        if self.failing_uploads.contains(src) {
            return Err(LinkpostError::Transport(format!("upload rejected: {src}")));
        }
        Ok(UploadedAsset::new(uploaded(src)))
    }

    async fn create_media_post(&self, channel: &Channel, post: &NewMediaPost) -> Result<MediaPost> {
        self.posts
            .lock()
            .unwrap()
            .push((channel.id.clone(), post.clone()));
        if self.fail_post {
            return Err(LinkpostError::Transport("media endpoint returned 500".to_string()));
        }
        Ok(MediaPost {
            id: 7,
            channel_id: channel.id.clone(),
            team_id: Some("team".to_string()),
            title: post.title.clone(),
            description: post.description.clone(),
            src: post.src.clone(),
            tags: post.tags.clone(),
            media_type: post.media_type.clone(),
        })
    }

    async fn create_media_reply(&self, post: &MediaPost, reply: &NewMediaReply) -> Result<MediaReply> {
        self.replies.lock().unwrap().push((post.id, reply.clone()));
        if self.fail_reply {
            return Err(LinkpostError::Transport("reply endpoint returned 403".to_string()));
        }
        Ok(MediaReply {
            id: reply.id as i64,
            post_id: Some(post.id),
            content_id: Some(post.id),
        })
    }
}

fn result(media: &[&str]) -> HandlerResult {
    HandlerResult::new(media.iter().map(|s| s.to_string()).collect())
        .with_title("T")
        .with_description("D")
        .with_tags(["x"])
}

fn reply_srcs(reply: &NewMediaReply) -> Vec<String> {
    reply
        .document
        .nodes
        .iter()
        .map(|n| n.data.as_ref().unwrap()["src"].as_str().unwrap().to_string())
        .collect()
}

/// **Test: Two successful uploads → one post from the first, one reply with the second.**
#[tokio::test]
async fn test_two_uploads_post_and_reply() {
    let client = Arc::new(RecordingClient::default());
    let publisher = MediaPublisher::new(client.clone());

    let publication = publisher
        .publish(&Channel::new("gallery"), result(&["https://src/a.png", "https://src/b.png"]))
        .await
        .unwrap();

    let posts = client.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let (channel_id, post) = &posts[0];
    assert_eq!(channel_id, "gallery");
    assert_eq!(post.src, uploaded("https://src/a.png"));
    assert_eq!(post.title, "T");
    assert_eq!(post.description, "D");
    assert_eq!(post.tags, vec!["x"]);
    assert_eq!(post.media_type, "image");

    let replies = client.replies.lock().unwrap();
    assert_eq!(replies.len(), 1);
    let (parent, reply) = &replies[0];
    assert_eq!(*parent, 7);
    assert!(reply.id < REPLY_ID_RANGE);
    assert_eq!(reply_srcs(reply), vec![uploaded("https://src/b.png")]);

    match publication {
        Publication::Posted { post, reply, failed_uploads } => {
            assert_eq!(post.id, 7);
            assert!(reply.is_some());
            assert_eq!(failed_uploads, 0);
        }
        other => panic!("unexpected publication: {other:?}"),
    }
}

/// **Test: Second upload fails → post only, no reply, one failed upload recorded.**
#[tokio::test]
async fn test_second_upload_fails_posts_without_reply() {
    let client = Arc::new(RecordingClient::failing(&["https://src/b.png"]));
    let publisher = MediaPublisher::new(client.clone());

    let publication = publisher
        .publish(&Channel::new("c"), result(&["https://src/a.png", "https://src/b.png"]))
        .await
        .unwrap();

    assert_eq!(client.uploads.lock().unwrap().len(), 2);
    assert_eq!(client.posts.lock().unwrap()[0].1.src, uploaded("https://src/a.png"));
    assert!(client.replies.lock().unwrap().is_empty());
    assert!(matches!(
        publication,
        Publication::Posted { reply: None, failed_uploads: 1, .. }
    ));
}

/// **Test: First upload fails → the first *successful* upload becomes primary; reply holds the rest.**
#[tokio::test]
async fn test_first_success_by_source_order_is_primary() {
    let client = Arc::new(RecordingClient::failing(&["https://src/a.png"]));
    let publisher = MediaPublisher::new(client.clone());

    publisher
        .publish(
            &Channel::new("c"),
            result(&["https://src/a.png", "https://src/b.png", "https://src/c.png", "https://src/d.png"]),
        )
        .await
        .unwrap();

    assert_eq!(
        *client.uploads.lock().unwrap(),
        vec!["https://src/a.png", "https://src/b.png", "https://src/c.png", "https://src/d.png"]
    );
    assert_eq!(client.posts.lock().unwrap()[0].1.src, uploaded("https://src/b.png"));
    let replies = client.replies.lock().unwrap();
    assert_eq!(
        reply_srcs(&replies[0].1),
        vec![uploaded("https://src/c.png"), uploaded("https://src/d.png")]
    );
}

/// **Test: All uploads fail → nothing posted, not an error.**
#[tokio::test]
async fn test_all_uploads_fail_is_silent_noop() {
    let client = Arc::new(RecordingClient::failing(&["https://src/a.png", "https://src/b.png"]));
    let publisher = MediaPublisher::new(client.clone());

    let publication = publisher
        .publish(&Channel::new("c"), result(&["https://src/a.png", "https://src/b.png"]))
        .await
        .unwrap();

    assert!(matches!(publication, Publication::Nothing { failed_uploads: 2 }));
    assert!(client.posts.lock().unwrap().is_empty());
    assert!(client.replies.lock().unwrap().is_empty());
}

/// **Test: Empty media list → no uploads attempted, no post.**
#[tokio::test]
async fn test_empty_media_does_nothing() {
    let client = Arc::new(RecordingClient::default());
    let publisher = MediaPublisher::new(client.clone());

    let publication = publisher.publish(&Channel::new("c"), result(&[])).await.unwrap();

    assert!(matches!(publication, Publication::Nothing { failed_uploads: 0 }));
    assert!(client.uploads.lock().unwrap().is_empty());
    assert!(client.posts.lock().unwrap().is_empty());
}

/// **Test: Post submission fails → Publish(Post) error and no reply attempted.**
#[tokio::test]
async fn test_post_failure_skips_reply() {
    let client = Arc::new(RecordingClient {
        fail_post: true,
        ..RecordingClient::default()
    });
    let publisher = MediaPublisher::new(client.clone());

    let err = publisher
        .publish(&Channel::new("c"), result(&["https://src/a.png", "https://src/b.png"]))
        .await
        .unwrap_err();

    assert!(matches!(err, LinkpostError::Publish(PublishError::Post(_))));
    assert!(err.user_message().is_some());
    assert!(client.replies.lock().unwrap().is_empty());
}

/// **Test: Reply submission fails → Publish(Reply) error naming the post; the post was still created.**
#[tokio::test]
async fn test_reply_failure_keeps_post() {
    let client = Arc::new(RecordingClient {
        fail_reply: true,
        ..RecordingClient::default()
    });
    let publisher = MediaPublisher::new(client.clone());

    let err = publisher
        .publish(&Channel::new("c"), result(&["https://src/a.png", "https://src/b.png"]))
        .await
        .unwrap_err();

    match err {
        LinkpostError::Publish(PublishError::Reply { post_id, .. }) => assert_eq!(post_id, 7),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.posts.lock().unwrap().len(), 1);
    assert_eq!(client.replies.lock().unwrap().len(), 1);
}

/// **Test: Titles longer than 80 characters are cut to exactly 80; shorter ones pass through.**
#[tokio::test]
async fn test_title_truncated_on_submission() {
    let client = Arc::new(RecordingClient::default());
    let publisher = MediaPublisher::new(client.clone());
    let long_title = "x".repeat(120);

    publisher
        .publish(
            &Channel::new("c"),
            HandlerResult::new(vec!["https://src/a.png".to_string()]).with_title(long_title.clone()),
        )
        .await
        .unwrap();
    publisher
        .publish(
            &Channel::new("c"),
            HandlerResult::new(vec!["https://src/a.png".to_string()]).with_title("short title"),
        )
        .await
        .unwrap();

    let posts = client.posts.lock().unwrap();
    assert_eq!(posts[0].1.title, long_title[..80]);
    assert_eq!(posts[1].1.title, "short title");
}
