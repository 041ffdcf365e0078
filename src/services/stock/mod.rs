//! 股票数据源接口
//!
//! 提供股票相关的数据抓取，支持多种数据源
//!
//! ## 数据来源
//! - 雪球：个股实时行情（含股息率）
//! - 乐咕乐股：申万三级行业列表与成份股估值
//! - 东方财富：全市场 A 股代码名称列表

pub mod eastmoney;
pub mod legulegu;
pub mod xueqiu;

/// 统一的浏览器 User-Agent
pub const BROWSER_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
