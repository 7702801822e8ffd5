//! 构建期配置
//!
//! 前端运行在浏览器中，没有进程环境变量：配置在编译时通过 `option_env!` 注入，
//! 缺失或无法解析时回退到默认值。

use tracing::Level;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5172";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(None, None, None)
    }
}

impl AppConfig {
    /// 读取 `RAMYRO_API_URL` / `RAMYRO_PAGE_SIZE` / `RAMYRO_LOG`
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("RAMYRO_API_URL"),
            option_env!("RAMYRO_PAGE_SIZE"),
            option_env!("RAMYRO_LOG"),
        )
    }

    pub fn from_vars(api_url: Option<&str>, page_size: Option<&str>, log: Option<&str>) -> Self {
        Self {
            api_base_url: api_url
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            page_size: page_size
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            log_level: log
                .and_then(|v| v.trim().parse::<Level>().ok())
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_vars(None, None, None);
        assert_eq!(config.api_base_url, "http://127.0.0.1:5172");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_vars(Some("https://api.ramyro.dev"), Some("25"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.ramyro.dev");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_vars(Some("  "), Some("0"), Some("loud"));
        assert_eq!(config, AppConfig::default());

        let config = AppConfig::from_vars(None, Some("ten"), None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
