//! Misbah+ AI - 常驻 HTTP 服务
//!
//! 使用 axum 框架提供 `POST /suggest-field`，把字段建议请求转发给 Gemini API。

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use misbah_suggest::api::create_app;
use misbah_suggest::config::AppConfig;
use misbah_suggest::state::create_shared_state;
use misbah_suggest::utils::setup_console_encoding;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 设置控制台编码
    setup_console_encoding();

    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "misbah_suggest=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Misbah+ AI suggestion server...");

    let config = AppConfig::load()?;
    info!("Loaded config: {:?}", config);
    if !config.has_api_key() {
        warn!("GOOGLE_API_KEY is not set, serving placeholder suggestions");
    }

    // 创建共享状态
    let state = create_shared_state(&config).context("failed to create Gemini client")?;

    let app = create_app(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Misbah+ AI server running on: {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
