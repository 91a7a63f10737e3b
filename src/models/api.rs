//! REST API 请求/响应模型

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// 默认回答语言
pub const DEFAULT_LANGUAGE: &str = "ar";

/// 字段建议请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub module_name: String,
    pub desired_outcome: String,
    pub field_id: String,
    pub known_info: Option<String>,
    pub constraints: Option<String>,
    pub language: String,
}

impl SuggestionRequest {
    /// 从原始请求体解析并校验
    ///
    /// 空请求体视为 `{}`；字段按 JS 真值规则取值
    pub fn from_json_body(body: &[u8]) -> AppResult<Self> {
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            body
        };

        let value: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidJson)?;
        // null 无法解构；数组、字符串等其他值视为没有任何字段
        let fields = match &value {
            Value::Object(map) => Some(map),
            Value::Null => return Err(AppError::InvalidJson),
            _ => None,
        };
        let field = |key: &str| truthy_text(fields.and_then(|f| f.get(key)));

        match (
            field("moduleName"),
            field("desiredOutcome"),
            field("fieldId"),
        ) {
            (Some(module_name), Some(desired_outcome), Some(field_id)) => Ok(Self {
                module_name,
                desired_outcome,
                field_id,
                known_info: field("knownInfo"),
                constraints: field("constraints"),
                // 空串也回退到默认语言，避免 prompt 中出现空的语言名
                language: field("language").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            }),
            _ => Err(AppError::MissingFields),
        }
    }
}

/// 取字段文本，假值（缺失、null、空串、0、false）返回 None
///
/// 数组和对象虽为 JS 真值，但没有可用于 prompt 的文本形式，同样视为缺失
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// 字段建议响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
    pub best: String,
    pub notes: String,
}
