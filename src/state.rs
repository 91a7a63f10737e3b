//! 应用状态管理
//!
//! 定义在请求处理器之间共享的只读状态。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::LlmError;
use crate::services::SuggestionService;

/// 应用共享状态
///
/// 请求处理期间不会写入，使用 Arc 在处理器之间共享
pub struct AppState {
    /// 字段建议服务
    pub suggestions: SuggestionService,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(suggestions: SuggestionService) -> Self {
        Self { suggestions }
    }
}

/// 根据配置创建可共享的应用状态
pub fn create_shared_state(config: &AppConfig) -> Result<Arc<AppState>, LlmError> {
    let suggestions = SuggestionService::from_config(config)?;
    Ok(Arc::new(AppState::new(suggestions)))
}
