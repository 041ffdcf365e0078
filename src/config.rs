//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，所有字段都有默认值，
//! 看板服务和离线抓取脚本共用同一份配置

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API Key（为空则不启用认证）
    #[serde(default)]
    pub api_key: String,
    /// 对外请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 数据文件配置
///
/// 看板进程和抓取进程共享这些路径
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 自选股 JSON 文件
    #[serde(default = "default_watchlist_file")]
    pub watchlist_file: String,
    /// 自选股红利数据 CSV
    #[serde(default = "default_dividend_csv")]
    pub dividend_csv: String,
    /// 申万全市场红利数据 CSV
    #[serde(default = "default_shenwan_csv")]
    pub shenwan_csv: String,
    /// 全量 A 股代码列表 CSV
    #[serde(default = "default_stock_list_csv")]
    pub stock_list_csv: String,
    /// 单股抓取间隔（毫秒，防反爬）
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// API 配置
    #[serde(default)]
    pub api: ApiConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
    /// 数据文件配置
    #[serde(default)]
    pub data: DataConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8501 }
fn default_timeout() -> u64 { 10 }
fn default_connect_timeout() -> u64 { 5 }
fn default_log_level() -> String { "info".to_string() }
fn default_watchlist_file() -> String { "self_selected_stocks.json".to_string() }
fn default_dividend_csv() -> String { "data/dividend_data.csv".to_string() }
fn default_shenwan_csv() -> String { "data/dividend_data_shenwan.csv".to_string() }
fn default_stock_list_csv() -> String { "data/a_stock_codes.csv".to_string() }
fn default_request_delay() -> u64 { 200 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            watchlist_file: default_watchlist_file(),
            dividend_csv: default_dividend_csv(),
            shenwan_csv: default_shenwan_csv(),
            stock_list_csv: default_stock_list_csv(),
            request_delay_ms: default_request_delay(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            api: ApiConfig::default(),
            log: LogConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    pub fn load() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
