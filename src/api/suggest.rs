//! 字段建议端点（常驻 HTTP 服务）

use axum::{
    body::Bytes,
    extract::State,
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{SuggestionRequest, SuggestionResponse};
use crate::state::AppState;

/// 生成字段建议
///
/// 请求体自行解析，以便非法 JSON 返回统一的错误格式
async fn suggest_field(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<SuggestionResponse>> {
    let request = SuggestionRequest::from_json_body(&body)?;
    debug!(
        "Suggestion request: module={}, field_id={}, language={}",
        request.module_name, request.field_id, request.language
    );

    Ok(Json(state.suggestions.generate(&request).await))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// 创建字段建议路由
pub fn suggest_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/suggest-field",
        post(suggest_field).fallback(method_not_allowed),
    )
}
