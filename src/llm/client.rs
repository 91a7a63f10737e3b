//! Gemini API 客户端

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::format::build_generate_content_endpoint;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, LlmError,
};

/// 连接超时
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// 错误响应体日志截断长度
const MAX_ERROR_PREVIEW: usize = 500;

/// Gemini generateContent 客户端
///
/// 每次调用只发一次请求，不做重试
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    /// 创建新的客户端
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::ConfigError("API Key is required".to_string()));
        }

        let model = model.into();

        // 构建 HTTP 客户端
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(LlmError::HttpError)?;

        Ok(Self {
            client,
            api_key,
            endpoint: build_generate_content_endpoint(base_url, &model),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 发送 prompt 并返回第一个候选的文本
    pub async fn generate_content(
        &self,
        prompt: &str,
        generation_config: GenerationConfig,
    ) -> Result<String, LlmError> {
        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config,
        };

        debug!(
            "Gemini API request: endpoint={}, prompt_chars={}",
            self.endpoint,
            prompt.chars().count()
        );

        // 密钥以查询参数传递，错误信息中去掉 URL 以免泄露
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            let status_code = status.as_u16();
            let preview: String = body.chars().take(MAX_ERROR_PREVIEW).collect();
            error!("Gemini API error: status={}, body={}", status_code, preview);
            return Err(LlmError::ApiError {
                status: status_code,
                message: preview,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.first_candidate_text()
    }
}

fn classify_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::HttpError(e.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let result = GeminiClient::new(
            "",
            "https://generativelanguage.googleapis.com",
            "gemini-pro",
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(LlmError::ConfigError(_))));
    }

    #[test]
    fn test_endpoint_built_from_model() {
        let client = GeminiClient::new(
            "key",
            "https://generativelanguage.googleapis.com",
            "gemini-1.5-flash",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(client.model(), "gemini-1.5-flash");
        assert_eq!(
            client.endpoint,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
