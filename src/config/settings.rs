// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、数据库、浏览器、爬取循环、YouTube 元数据、指标和日志等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 浏览器会话配置
    pub browser: BrowserSettings,
    /// 爬取循环配置
    pub crawl: CrawlSettings,
    /// YouTube 元数据配置
    pub youtube: YouTubeSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 浏览器会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 引擎类型 (chromium, http)
    pub engine: String,
    /// 远程调试地址，设置后连接已有的 Chrome 实例而不是启动新进程
    pub remote_debugging_url: Option<String>,
    /// 浏览器可执行文件路径
    pub executable: Option<String>,
    /// 是否以无头模式运行
    pub headless: bool,
    /// 页面加载超时（秒）
    pub page_load_timeout_secs: u64,
    /// 脚本执行超时（秒）
    pub script_timeout_secs: u64,
    /// 请求头中的 User-Agent
    pub user_agent: String,
    /// 请求头中的 Accept-Language
    pub accept_language: String,
    /// 抓取出错时保存截图的目录
    pub screenshot_dir: Option<String>,
}

impl BrowserSettings {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(self.script_timeout_secs)
    }
}

/// 爬取循环配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 单次爬取最多访问的原始节点数
    pub hard_ceiling: usize,
    /// 滚动加载后的等待时间（毫秒）
    pub scroll_pause_ms: u64,
    /// 连续无新内容的滚动次数上限
    pub max_idle_scrolls: u32,
    /// 话题标签搜索的最低播放量
    pub min_views: u64,
}

/// YouTube 元数据配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeSettings {
    /// YouTube Data API 密钥，未设置时使用 oEmbed 接口
    pub api_key: Option<String>,
    /// Data API 基础地址
    pub api_base_url: String,
    /// oEmbed 接口地址
    pub oembed_url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 输出格式 (pretty, json)
    pub format: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和 `TUBECRAWL__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("TUBECRAWL").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含默认值的配置，测试中使用
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite://tubecrawl.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("browser.engine", "chromium")?
            .set_default("browser.headless", true)?
            .set_default("browser.page_load_timeout_secs", 300)?
            .set_default("browser.script_timeout_secs", 300)?
            .set_default(
                "browser.user_agent",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
            )?
            .set_default("browser.accept_language", "ko-KR,ko;q=0.9")?
            // YouTube provides at most ~450 items per hashtag feed
            .set_default("crawl.hard_ceiling", 400)?
            .set_default("crawl.scroll_pause_ms", 500)?
            .set_default("crawl.max_idle_scrolls", 10)?
            .set_default("crawl.min_views", 1_000_000)?
            .set_default("youtube.api_base_url", "https://www.googleapis.com/youtube/v3")?
            .set_default("youtube.oembed_url", "https://www.youtube.com/oembed")?
            .set_default("youtube.timeout_secs", 30)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("log.format", "pretty")
    }
}
