//! 传输层最小配置：token、API URL、媒体 URL、请求超时。
//! 与外部交互：从环境变量 GUILDED_TOKEN、GUILDED_API_URL、GUILDED_MEDIA_URL、GUILDED_REQUEST_TIMEOUT_SECS 加载。

use anyhow::Result;
use std::env;

pub const DEFAULT_API_URL: &str = "https://www.guilded.gg/api";
pub const DEFAULT_MEDIA_URL: &str = "https://media.guilded.gg";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Guilded 传输配置（会话 token 与端点）。
#[derive(Debug, Clone)]
pub struct GuildedConfig {
    pub token: String,
    pub api_url: String,
    pub media_url: String,
    pub request_timeout_secs: u64,
}

impl GuildedConfig {
    /// 从环境变量加载：GUILDED_TOKEN 必填，其余可选。`token` 非空时覆盖 GUILDED_TOKEN。
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let token = match token {
            Some(t) => t,
            None => env::var("GUILDED_TOKEN").map_err(|_| anyhow::anyhow!("GUILDED_TOKEN not set"))?,
        };
        let api_url = env::var("GUILDED_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let media_url =
            env::var("GUILDED_MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string());
        let request_timeout_secs = env::var("GUILDED_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Ok(Self {
            token,
            api_url,
            media_url,
            request_timeout_secs,
        })
    }

    /// 使用给定 token 构造，其余为默认值。
    pub fn with_token(token: String) -> Self {
        Self {
            token,
            api_url: DEFAULT_API_URL.to_string(),
            media_url: DEFAULT_MEDIA_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// 校验：token 非空，API / 媒体 URL 必须是合法 URL。
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            anyhow::bail!("GUILDED_TOKEN is empty");
        }
        for (name, value) in [
            ("GUILDED_API_URL", &self.api_url),
            ("GUILDED_MEDIA_URL", &self.media_url),
        ] {
            if reqwest::Url::parse(value).is_err() {
                anyhow::bail!("{} is set but not a valid URL: {}", name, value);
            }
        }
        Ok(())
    }
}
