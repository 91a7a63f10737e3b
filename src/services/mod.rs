//! 服务层模块

mod prompt_service;
mod suggestion_service;

pub use prompt_service::PromptService;
pub use suggestion_service::{FallbackReason, SuggestionService, MAX_SUGGESTIONS};
