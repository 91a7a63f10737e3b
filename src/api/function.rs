//! 字段建议函数（单次调用触发）
//!
//! 事件与响应沿用无服务器函数平台的 JSON 形状：
//! 入参 `{ httpMethod, body }`，出参 `{ statusCode, body, headers }`。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error};

use crate::error::AppError;
use crate::models::SuggestionRequest;
use crate::services::SuggestionService;

/// 函数调用事件
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// 函数响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub body: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl FunctionResponse {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            body,
            headers,
        }
    }
}

impl From<AppError> for FunctionResponse {
    fn from(err: AppError) -> Self {
        let status_code = err.status_code().as_u16();
        if err.is_json() {
            Self::json(status_code, err.render_body())
        } else {
            Self {
                status_code,
                body: err.render_body(),
                headers: BTreeMap::new(),
            }
        }
    }
}

/// 处理一次函数调用
pub async fn handle_event(service: &SuggestionService, event: FunctionEvent) -> FunctionResponse {
    if event.http_method != "POST" {
        return AppError::MethodNotAllowed.into();
    }

    let body = event.body.unwrap_or_default();
    let request = match SuggestionRequest::from_json_body(body.as_bytes()) {
        Ok(request) => request,
        Err(e) => return e.into(),
    };
    debug!(
        "Function invocation: module={}, field_id={}",
        request.module_name, request.field_id
    );

    let response = service.generate(&request).await;
    match serde_json::to_string(&response) {
        Ok(body) => FunctionResponse::json(200, body),
        Err(e) => {
            error!("Failed to serialize suggestion response: {}", e);
            FunctionResponse {
                status_code: 500,
                body: "Internal Server Error".to_string(),
                headers: BTreeMap::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuggestionResponse;

    fn event(method: &str, body: Option<&str>) -> FunctionEvent {
        FunctionEvent {
            http_method: method.to_string(),
            body: body.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_non_post_is_rejected() {
        let service = SuggestionService::new(None);
        for method in ["GET", "PUT", "DELETE", "post"] {
            let response = handle_event(&service, event(method, None)).await;
            assert_eq!(response.status_code, 405);
            assert_eq!(response.body, "Method Not Allowed");
            assert!(response.headers.is_empty());
        }
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let service = SuggestionService::new(None);
        let response = handle_event(&service, event("POST", Some("{oops"))).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"Invalid JSON"}"#);
    }

    #[tokio::test]
    async fn test_missing_body_means_missing_fields() {
        let service = SuggestionService::new(None);
        let response = handle_event(&service, event("POST", None)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            r#"{"error":"Missing required fields: moduleName, desiredOutcome, fieldId"}"#
        );
    }

    #[tokio::test]
    async fn test_success_without_credential() {
        let service = SuggestionService::new(None);
        let body = r#"{"moduleName":"m","desiredOutcome":"d","fieldId":"name"}"#;
        let response = handle_event(&service, event("POST", Some(body))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        let parsed: SuggestionResponse = serde_json::from_str(&response.body).unwrap();
        assert_eq!(parsed.suggestions.len(), 3);
        assert_eq!(parsed.best, "قيمة 1 لـ name");
        assert!(!parsed.notes.is_empty());
    }

    #[test]
    fn test_event_deserialization() {
        let event: FunctionEvent =
            serde_json::from_str(r#"{"httpMethod":"POST","body":null,"path":"/x"}"#).unwrap();
        assert_eq!(event.http_method, "POST");
        assert!(event.body.is_none());
    }
}
