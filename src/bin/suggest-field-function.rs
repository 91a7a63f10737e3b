//! Misbah+ AI - 单次调用函数入口
//!
//! 从 stdin 读取一个调用事件 `{ httpMethod, body }`，
//! 向 stdout 写出一个函数响应 `{ statusCode, body, headers }`。日志输出到 stderr。

use anyhow::Context;
use std::io::{Read, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use misbah_suggest::api::{handle_event, FunctionEvent};
use misbah_suggest::config::AppConfig;
use misbah_suggest::services::SuggestionService;
use misbah_suggest::utils::setup_console_encoding;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup_console_encoding();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "misbah_suggest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    let service = SuggestionService::from_config(&config).context("failed to create Gemini client")?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read invocation event from stdin")?;
    let event: FunctionEvent =
        serde_json::from_str(&input).context("invocation event is not valid JSON")?;

    let response = handle_event(&service, event).await;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    Ok(())
}
