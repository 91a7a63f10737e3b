//! 字段建议服务
//!
//! 构建 prompt、调用 Gemini、解析结果。任何失败都降级为默认建议，不向调用方抛错。

use tracing::{info, warn, Instrument};
use uuid::Uuid;

use super::PromptService;
use crate::config::AppConfig;
use crate::llm::{GeminiClient, GenerationConfig, LlmError};
use crate::models::{SuggestionRequest, SuggestionResponse};

/// 最多返回的建议数量
pub const MAX_SUGGESTIONS: usize = 5;

/// 降级响应中的默认建议数量
const FALLBACK_COUNT: usize = 3;

/// 降级原因
///
/// 只用于日志和选择 notes 文本，不出现在响应中
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// 未配置 API 密钥
    NoCredential,
    /// 网络错误、超时或非 2xx 响应
    UpstreamUnreachable,
    /// 响应不是 JSON 或缺少候选结构
    MalformedUpstreamResponse,
}

impl FallbackReason {
    /// 面向用户的说明文本
    pub fn notes(self) -> &'static str {
        match self {
            FallbackReason::NoCredential => "لم يتم توفير مفتاح API؛ هذه اقتراحات افتراضية.",
            FallbackReason::UpstreamUnreachable | FallbackReason::MalformedUpstreamResponse => {
                "حدث خطأ عند الاتصال بواجهة Gemini؛ هذه اقتراحات افتراضية."
            }
        }
    }
}

impl From<&LlmError> for FallbackReason {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::ConfigError(_) => FallbackReason::NoCredential,
            LlmError::HttpError(_) | LlmError::ApiError { .. } | LlmError::Timeout => {
                FallbackReason::UpstreamUnreachable
            }
            LlmError::JsonError(_) | LlmError::MalformedResponse(_) => {
                FallbackReason::MalformedUpstreamResponse
            }
        }
    }
}

impl SuggestionResponse {
    /// 从模型输出文本解析建议
    ///
    /// 按行切分、去除首尾空白、丢弃空行，最多保留前 5 行
    pub fn from_model_text(text: &str) -> Self {
        let suggestions: Vec<String> = text
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(MAX_SUGGESTIONS)
            .map(String::from)
            .collect();

        Self {
            best: suggestions.first().cloned().unwrap_or_default(),
            suggestions,
            notes: String::new(),
        }
    }

    /// 降级响应：三条占位建议
    pub fn fallback(field_id: &str, reason: FallbackReason) -> Self {
        let suggestions: Vec<String> = (1..=FALLBACK_COUNT)
            .map(|n| format!("قيمة {} لـ {}", n, field_id))
            .collect();

        Self {
            best: suggestions[0].clone(),
            suggestions,
            notes: reason.notes().to_string(),
        }
    }
}

/// 字段建议服务
pub struct SuggestionService {
    client: Option<GeminiClient>,
    prompts: PromptService,
}

impl SuggestionService {
    /// 创建服务，`client` 为空时始终返回降级响应
    pub fn new(client: Option<GeminiClient>) -> Self {
        Self {
            client,
            prompts: PromptService::new(),
        }
    }

    /// 根据配置创建服务
    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        if !config.has_api_key() {
            return Ok(Self::new(None));
        }

        let client = GeminiClient::new(
            config.api_key.as_str(),
            &config.base_url,
            config.model.as_str(),
            config.request_timeout(),
        )?;

        Ok(Self::new(Some(client)))
    }

    /// 是否配置了上游客户端
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// 生成字段建议
    pub async fn generate(&self, request: &SuggestionRequest) -> SuggestionResponse {
        let request_id = Uuid::new_v4().to_string()[..8].to_string();
        let span = tracing::info_span!("suggest", request_id = %request_id, field_id = %request.field_id);

        self.generate_inner(request).instrument(span).await
    }

    async fn generate_inner(&self, request: &SuggestionRequest) -> SuggestionResponse {
        let Some(client) = &self.client else {
            info!("No API key configured, returning placeholder suggestions");
            return SuggestionResponse::fallback(&request.field_id, FallbackReason::NoCredential);
        };

        let prompt = self.prompts.build_suggestion_prompt(request);

        match client
            .generate_content(&prompt, GenerationConfig::suggestions())
            .await
        {
            Ok(text) => {
                let response = SuggestionResponse::from_model_text(&text);
                info!(
                    "Suggestions generated: model={}, count={}",
                    client.model(),
                    response.suggestions.len()
                );
                response
            }
            Err(e) => {
                let reason = FallbackReason::from(&e);
                warn!("Error calling Gemini API ({:?}): {}", reason, e);
                SuggestionResponse::fallback(&request.field_id, reason)
            }
        }
    }
}
