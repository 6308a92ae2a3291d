//! OpenGraph handler: fetches an HTML page and posts the images advertised in its `og:*` meta tags.

use async_trait::async_trait;
use linkpost_core::{Handler, HandlerOutcome, HandlerResult, LinkpostError, Result};
use regex::Regex;
use reqwest::{header, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config block for the `opengraph` handler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenGraphConfig {
    /// Hosts this handler accepts (sub-domains included). Empty means any host.
    pub hosts: Vec<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Tags attached in addition to the page's `article:tag` values.
    pub tags: Vec<String>,
}

impl Default for OpenGraphConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            user_agent: concat!("linkpost/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 15,
            tags: Vec::new(),
        }
    }
}

/// Metadata scraped from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub images: Vec<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

pub struct OpenGraphHandler {
    config: OpenGraphConfig,
    http: reqwest::Client,
    meta_re: Regex,
    attr_re: Regex,
    title_re: Regex,
}

impl OpenGraphHandler {
    pub const ID: &'static str = "opengraph";

    pub fn new(config: OpenGraphConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LinkpostError::Config(format!("handler '{}': {}", Self::ID, e)))?;

        Ok(Self {
            config,
            http,
            meta_re: compile(r"(?is)<meta\b[^>]*>")?,
            attr_re: compile(r#"(?is)([a-z_:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
            title_re: compile(r"(?is)<title[^>]*>(.*?)</title>")?,
        })
    }

    /// Builds the handler from its JSON config block (`{}` for defaults).
    pub fn from_config(block: Value) -> Result<Self> {
        let config: OpenGraphConfig = serde_json::from_value(block)
            .map_err(|e| LinkpostError::Config(format!("handler '{}': {}", Self::ID, e)))?;
        Self::new(config)
    }

    fn host_allowed(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.config.hosts.is_empty()
            || self.config.hosts.iter().any(|h| {
                let h = h.to_lowercase();
                host == h || host.ends_with(&format!(".{h}"))
            })
    }

    /// Extracts og:image / og:title / og:description / article:tag, falling back to `<title>`.
    pub fn parse_page(&self, html: &str) -> PageMeta {
        let mut meta = PageMeta::default();

        for tag in self.meta_re.find_iter(html) {
            let mut key = None;
            let mut content = None;
            for cap in self.attr_re.captures_iter(tag.as_str()) {
                let name = cap[1].to_lowercase();
                let value = cap.get(2).or_else(|| cap.get(3)).map(|m| m.as_str());
                match name.as_str() {
                    "property" | "name" => key = value.map(str::to_lowercase),
                    "content" => content = value.map(decode_entities),
                    _ => {}
                }
            }
            let (Some(key), Some(content)) = (key, content) else {
                continue;
            };
            let content = content.trim().to_string();
            if content.is_empty() {
                continue;
            }
            match key.as_str() {
                "og:image" | "og:image:url" => {
                    if !meta.images.contains(&content) {
                        meta.images.push(content);
                    }
                }
                "og:title" => {
                    meta.title.get_or_insert(content);
                }
                "og:description" => {
                    meta.description.get_or_insert(content);
                }
                "article:tag" => {
                    if !meta.tags.contains(&content) {
                        meta.tags.push(content);
                    }
                }
                _ => {}
            }
        }

        if meta.title.is_none() {
            meta.title = self
                .title_re
                .captures(html)
                .map(|c| decode_entities(c[1].trim()))
                .filter(|t| !t.is_empty());
        }

        meta
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| LinkpostError::Config(format!("invalid pattern: {}", e)))
}

/// Named and numeric character references, e.g. `&eacute;` or `&#8217;`.
fn decode_entities(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

#[async_trait]
impl Handler for OpenGraphHandler {
    fn id(&self) -> &str {
        Self::ID
    }

    #[instrument(skip(self))]
    async fn handle(&self, url: &str) -> HandlerOutcome {
        let page_url = match Url::parse(url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => u,
            _ => return HandlerOutcome::Declined,
        };
        let host = page_url.host_str().unwrap_or_default().to_string();
        if !self.host_allowed(&host) {
            return HandlerOutcome::Declined;
        }

        let response = match self.http.get(page_url.clone()).send().await {
            Ok(r) => r,
            Err(e) => return HandlerOutcome::faulted(format!("Could not fetch {host}: {e}")),
        };

        let status = response.status();
        if !status.is_success() {
            return HandlerOutcome::faulted(format!("{host} returned {status}"));
        }

        let is_html = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("html"))
            .unwrap_or(true);
        if !is_html {
            debug!(url = %url, "Not an HTML page");
            return HandlerOutcome::Declined;
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return HandlerOutcome::faulted(format!("Could not read page from {host}: {e}")),
        };

        let page = self.parse_page(&body);
        if page.images.is_empty() {
            debug!(url = %url, "No og:image on page");
            return HandlerOutcome::Declined;
        }

        let media: Vec<String> = page
            .images
            .iter()
            .filter_map(|src| page_url.join(src).ok())
            .map(|u| u.to_string())
            .collect();
        info!(url = %url, media = media.len(), "OpenGraph media found");

        let result = HandlerResult::new(media)
            .with_title(page.title.unwrap_or_default())
            .with_description(page.description.unwrap_or_default())
            .with_tags(page.tags)
            .with_tags(self.config.tags.iter().cloned());
        HandlerOutcome::Matched(result)
    }
}
