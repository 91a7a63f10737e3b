//! 统一错误处理模块
//!
//! 定义客户端输入错误类型，并实现 axum 的 IntoResponse trait 以便自动转换为 HTTP 响应。
//! 上游 API 错误不在这里：它们在建议服务内部被吸收为降级响应。

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// 应用错误枚举
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 请求体不是合法的 JSON 对象
    #[error("Invalid JSON")]
    InvalidJson,

    /// 缺少必填字段
    #[error("Missing required fields: moduleName, desiredOutcome, fieldId")]
    MissingFields,

    /// 非 POST 请求
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// 配置相关错误（仅在启动阶段出现）
    #[error("配置错误: {0}")]
    Config(String),
}

impl AppError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidJson | AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 响应体是否为 JSON（405 返回纯文本）
    pub fn is_json(&self) -> bool {
        !matches!(self, AppError::MethodNotAllowed)
    }

    /// 渲染响应体文本
    pub fn render_body(&self) -> String {
        if self.is_json() {
            json!({ "error": self.to_string() }).to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let content_type = if self.is_json() {
            "application/json"
        } else {
            "text/plain; charset=utf-8"
        };

        (
            self.status_code(),
            [(header::CONTENT_TYPE, content_type)],
            self.render_body(),
        )
            .into_response()
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;
