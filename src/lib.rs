//! Misbah+ AI 字段建议服务
//!
//! 把表单字段建议请求转发给 Gemini API，并把结果整理成固定的 JSON 形状。
//! 提供两个入口：常驻 HTTP 服务和单次调用的函数。

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
