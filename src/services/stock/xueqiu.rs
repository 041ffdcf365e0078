//! 雪球个股行情接口
//!
//! 对接 https://stock.xueqiu.com 的 quote.json 实时行情（含股息率），
//! 请求前需要从雪球主页 Cookie 中拿到 xq_a_token

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::BROWSER_UA;

/// 雪球个股行情 API
const XUEQIU_QUOTE_API: &str = "https://stock.xueqiu.com/v5/stock/quote.json";
/// 雪球主页（用于获取 xq_a_token Cookie）
const XUEQIU_HOME_URL: &str = "https://xueqiu.com/";
/// 内置兜底 token，主页获取失败时使用
const DEFAULT_XQ_TOKEN: &str = "6e4ce92a9cf5e8d5d2f7a3f0b9e4c1a8d03b57f2";

/// 雪球行情关键字段
///
/// 三个字段都可能缺失，价格或市值缺失的股票不落盘
#[derive(Debug, Clone, Deserialize)]
pub struct XueqiuQuote {
    /// 最新价
    pub current: Option<f64>,
    /// 总市值（元）
    pub market_capital: Option<f64>,
    /// 股息率（%），无分红时为空
    pub dividend_yield: Option<f64>,
}

/// 根据代码前缀映射雪球 symbol
///
/// 沪市 60/68 -> SH，深市 00/30 -> SZ，北交所 8 -> BJ，其余视为非 A 股
pub fn symbol_for_quote(code: &str) -> Option<String> {
    let code = code.trim();
    if code.starts_with("60") || code.starts_with("68") {
        Some(format!("SH{}", code))
    } else if code.starts_with("00") || code.starts_with("30") {
        Some(format!("SZ{}", code))
    } else if code.starts_with('8') {
        Some(format!("BJ{}", code))
    } else {
        None
    }
}

/// 从雪球主页 Cookie 中获取 xq_a_token，失败返回 None
pub async fn fetch_xq_token(client: &Client) -> Option<String> {
    let response = client
        .get(XUEQIU_HOME_URL)
        .header("User-Agent", BROWSER_UA)
        .send()
        .await
        .ok()?;
    let token = response
        .cookies()
        .find(|c| c.name() == "xq_a_token")
        .map(|c| c.value().to_string());
    token
}

/// 内置兜底 token
pub fn default_token() -> String {
    DEFAULT_XQ_TOKEN.to_string()
}

/// 获取单支股票的行情（含股息率）
pub async fn get_stock_quote(client: &Client, token: &str, symbol: &str) -> Result<XueqiuQuote> {
    let mut url = Url::parse(XUEQIU_QUOTE_API)?;
    url.query_pairs_mut()
        .append_pair("symbol", symbol)
        .append_pair("extend", "detail");

    let response = client
        .get(url)
        .header("Cookie", format!("xq_a_token={};", token))
        .header("User-Agent", BROWSER_UA)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("获取行情失败: 状态码 {}", response.status()));
    }

    let json: serde_json::Value = response.json().await?;
    parse_quote_json(&json, symbol)
}

/// 解析 quote.json 响应
///
/// 格式: {"data": {"quote": {"current": 33.5, "market_capital": 8.4e11, "dividend_yield": 5.2, ...}}}
fn parse_quote_json(json: &serde_json::Value, symbol: &str) -> Result<XueqiuQuote> {
    let quote = json
        .get("data")
        .and_then(|d| d.get("quote"))
        .ok_or_else(|| anyhow!("股票 {} 数据格式异常", symbol))?;
    Ok(XueqiuQuote {
        current: quote.get("current").and_then(|v| v.as_f64()),
        market_capital: quote.get("market_capital").and_then(|v| v.as_f64()),
        dividend_yield: quote.get("dividend_yield").and_then(|v| v.as_f64()),
    })
}

// ==================== 测试模块 ====================
