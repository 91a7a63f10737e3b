//! Gemini generateContent 类型定义

use serde::{Deserialize, Serialize};

/// 请求中的一条内容
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// 角色：user, model
    pub role: String,
    /// 内容片段
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// 文本片段
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// 生成参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// 温度参数
    pub temperature: f64,
    /// top_p 参数
    pub top_p: f64,
    /// 最大输出 token 数
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// 字段建议使用的固定参数
    pub const fn suggestions() -> Self {
        Self {
            temperature: 0.6,
            top_p: 0.8,
            max_output_tokens: 150,
        }
    }
}

/// generateContent 请求载荷
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// generateContent 响应
///
/// 所有字段都是可选的，结构缺失由调用方判定为错误
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// 取第一个候选的全部文本，片段之间用单个空格连接
    pub fn first_candidate_text(&self) -> Result<String, LlmError> {
        let candidate = self
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .ok_or_else(|| LlmError::MalformedResponse("no candidates".to_string()))?;

        let parts = candidate
            .content
            .as_ref()
            .and_then(|c| c.parts.as_ref())
            .ok_or_else(|| LlmError::MalformedResponse("candidate has no content parts".to_string()))?;

        let text = parts
            .iter()
            .map(|p| p.text.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(text)
    }
}

/// LLM 错误类型
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP 请求错误
    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API 返回错误
    #[error("API 错误 ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// 超时错误
    #[error("请求超时")]
    Timeout,

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// JSON 解析错误
    #[error("JSON 解析失败: {0}")]
    JsonError(#[from] serde_json::Error),

    /// 响应结构不符合预期
    #[error("响应结构无效: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            generation_config: GenerationConfig::suggestions(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "generationConfig": { "temperature": 0.6, "topP": 0.8, "maxOutputTokens": 150 }
            })
        );
    }

    #[test]
    fn test_first_candidate_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "a\nb" }, { "text": "c" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.first_candidate_text().unwrap(), "a\nb c");
    }

    #[test]
    fn test_missing_structure_is_malformed() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "error": { "code": 400, "message": "API key not valid" } }),
        ] {
            let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
            assert!(matches!(
                response.first_candidate_text(),
                Err(LlmError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_part_without_text_is_empty() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "x" }, {}] } }]
        }))
        .unwrap();

        assert_eq!(response.first_candidate_text().unwrap(), "x ");
    }
}
