//! 控制台编码设置

/// 在 Windows 上设置控制台代码页为 UTF-8，使阿拉伯语日志正常显示
#[cfg(windows)]
pub fn setup_console_encoding() {
    unsafe {
        // 设置控制台输出代码页为 UTF-8 (65001)
        extern "system" {
            fn SetConsoleOutputCP(code_page: u32) -> i32;
            fn SetConsoleCP(code_page: u32) -> i32;
        }
        SetConsoleOutputCP(65001);
        SetConsoleCP(65001);
    }
}

#[cfg(not(windows))]
pub fn setup_console_encoding() {}
