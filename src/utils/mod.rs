//! 工具模块

mod console;

pub use console::setup_console_encoding;
