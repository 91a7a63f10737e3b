//! API 路由模块

mod function;
mod health;
mod suggest;

pub use function::{handle_event, FunctionEvent, FunctionResponse};
pub use health::health_routes;
pub use suggest::suggest_routes;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use std::sync::Arc;

/// 创建所有 API 路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(suggest_routes())
        .with_state(state)
}

/// 创建完整应用（路由 + CORS + 请求追踪）
pub fn create_app(state: Arc<AppState>) -> Router {
    // 允许所有来源，表单页面可能部署在其他域名
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_api_routes(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
