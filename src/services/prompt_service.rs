//! Prompt 构建服务
//!
//! 负责把字段建议请求组装成发送给模型的阿拉伯语指令文本

use crate::models::SuggestionRequest;

/// 段落分隔符
const SECTION_SEPARATOR: &str = "\n\n";

/// Prompt 服务
pub struct PromptService;

impl PromptService {
    /// 创建新的 Prompt 服务
    pub fn new() -> Self {
        Self
    }

    /// 构建字段建议 prompt
    ///
    /// 未提供的可选段落（已知信息、约束）整段省略
    pub fn build_suggestion_prompt(&self, request: &SuggestionRequest) -> String {
        let mut sections = vec![
            "أنت مساعد محترف لملء حقول نموذج Misbah+.".to_string(),
            format!(
                "مهمة المستخدم هي إعداد {} للحصول على {}.",
                request.module_name, request.desired_outcome
            ),
            format!(
                "الرجاء اقتراح 5 قيم محتملة لخانة «{}» في النموذج.",
                request.field_id
            ),
        ];

        if let Some(known_info) = Self::non_empty(request.known_info.as_deref()) {
            sections.push(format!("معلومات إضافية:\n{}", known_info));
        }

        if let Some(constraints) = Self::non_empty(request.constraints.as_deref()) {
            sections.push(format!("قيود إضافية:\n{}", constraints));
        }

        sections.push(format!("أجب باللغة {} فقط.", request.language));
        sections.push("لا تقدم أي أمثلة توضيحية. استعمل عبارات قصيرة واضحة.".to_string());
        sections.push("أعد الاقتراحات كسطر واحد لكل قيمة. لا تبدأ بأي تعداد.".to_string());

        sections.join(SECTION_SEPARATOR)
    }

    fn non_empty(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.is_empty())
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}
