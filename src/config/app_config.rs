//! 应用配置管理
//!
//! 启动时加载一次：默认值 → 可执行文件同级的 config.json → 环境变量。
//! 加载后的配置不可变，通过参数显式传递给各个服务。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::error::AppError;

/// 获取配置文件路径
fn get_config_path() -> PathBuf {
    // 配置文件位于可执行文件同级目录
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 应用配置结构体
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Google API 密钥，为空时返回默认建议
    #[serde(default)]
    pub api_key: String,

    /// Gemini API 基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 上游请求超时（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// 加载配置：文件 + 进程环境变量
    pub fn load() -> Result<Self, AppError> {
        let mut config = load_config_from_file().unwrap_or_default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// 用环境变量覆盖配置
    ///
    /// `lookup` 抽象了环境变量读取，便于测试时注入
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string());

        if let Some(api_key) = read("GOOGLE_API_KEY") {
            self.api_key = api_key;
        }
        if let Some(base_url) = read("GEMINI_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(model) = read("GEMINI_MODEL").filter(|v| !v.is_empty()) {
            self.model = model;
        }
        if let Some(host) = read("HOST").filter(|v| !v.is_empty()) {
            self.host = host;
        }
        if let Some(port) = read("PORT").filter(|v| !v.is_empty()) {
            self.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("PORT 不是合法端口: {}", port)))?;
        }
        if let Some(secs) = read("UPSTREAM_TIMEOUT_SECS").filter(|v| !v.is_empty()) {
            let parsed: u64 = secs.parse().map_err(|_| {
                AppError::Config(format!("UPSTREAM_TIMEOUT_SECS 不是合法秒数: {}", secs))
            })?;
            // 0 秒超时会让每次上游调用都失败
            if parsed == 0 {
                return Err(AppError::Config(
                    "UPSTREAM_TIMEOUT_SECS 必须大于 0".to_string(),
                ));
            }
            self.request_timeout_secs = parsed;
        }

        Ok(())
    }

    /// 是否配置了 API 密钥
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// 上游请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| AppError::Config(format!("HOST 不是合法 IP 地址: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// 从文件加载配置
fn load_config_from_file() -> Option<AppConfig> {
    let path = get_config_path();
    if !path.exists() {
        return None;
    }

    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

/// API 密钥脱敏
fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("GOOGLE_API_KEY", "secret-key-123456"),
                ("PORT", "8080"),
                ("GEMINI_MODEL", "gemini-1.5-flash"),
                ("UPSTREAM_TIMEOUT_SECS", "15"),
            ]))
            .unwrap();

        assert!(config.has_api_key());
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_empty_api_key_is_not_configured() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("GOOGLE_API_KEY", "  ")])).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = AppConfig::default();
        let err = config.apply_env(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_zero_timeout_is_config_error() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(env(&[("UPSTREAM_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(config.request_timeout_secs, 20);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = AppConfig {
            api_key: "AIzaSyVerySecretValue".to_string(),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("VerySecret"));
        assert!(rendered.contains("AIza...alue"));
    }

    #[test]
    fn test_mask_short_key() {
        assert_eq!(mask_api_key("abc"), "***");
        assert_eq!(mask_api_key(""), "");
    }
}
