//! 日志初始化：控制台与（可选）日志文件均使用 tracing_subscriber 的 fmt layer 完整格式。

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// 初始化全局 tracing 订阅者。
/// 传入 `log_file_path` 时通过 Tee 将同一份输出同时写入 stdout 与日志文件（追加模式）；否则仅写 stdout。
/// 从环境变量 RUST_LOG 读取日志级别；未设置则默认为 info。
/// 注意：需在调用本函数前加载 .env（dotenvy::dotenv()），否则 RUST_LOG 不会生效。
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let writer = match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(io::stdout.and(Arc::new(file)))
        }
        None => BoxMakeWriter::new(io::stdout),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_creates_log_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linkpost.log");

        init_tracing(Some(path.to_str().unwrap())).unwrap();
        assert!(path.exists());

        // global subscriber is already set
        assert!(init_tracing(None).is_err());
    }
}
