//! 东方财富股票列表接口
//!
//! 分页拉取全市场股票代码和名称，过滤出 A 股
//! 数据来源: https://80.push2.eastmoney.com/api/qt/clist/get

use anyhow::{anyhow, Result};
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

use super::BROWSER_UA;

/// 东方财富列表 API
const EASTMONEY_CLIST_API: &str = "https://80.push2.eastmoney.com/api/qt/clist/get";
/// 市场过滤：沪A、深A、创业板、科创板、北交所
const EASTMONEY_FS_PARAM: &str = "m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23,m:0+t:81+s:2048";
/// A股代码规则：沪A 60开头、深A 00/30开头、北交所 8 开头的6位数字
const A_STOCK_PATTERN: &str = r"^(60|00|30|8[0-9])[0-9]{4}$";
/// 单页条数
const PAGE_SIZE: usize = 200;

/// 股票代码名称对
#[derive(Debug, Clone)]
pub struct StockListItem {
    pub code: String,
    pub name: String,
}

/// 判断是否为 A 股代码
pub fn is_a_stock_code(code: &str) -> bool {
    Regex::new(A_STOCK_PATTERN).unwrap().is_match(code)
}

/// 获取全市场 A 股代码名称列表
///
/// 逐页拉取直到返回条数不足一页，再按 A 股代码规则过滤
pub async fn get_a_stock_list(client: &Client) -> Result<Vec<StockListItem>> {
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let batch = fetch_list_page(client, page).await?;
        if batch.is_empty() {
            break;
        }
        let last_page = batch.len() < PAGE_SIZE;
        items.extend(batch);
        if last_page {
            break;
        }
        page += 1;
        // 翻页间隔，防反爬
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let re = Regex::new(A_STOCK_PATTERN).unwrap();
    items.retain(|item| re.is_match(&item.code));
    println!("📊 A股股票总数：{}", items.len());
    Ok(items)
}

/// 拉取单页列表
async fn fetch_list_page(client: &Client, page: usize) -> Result<Vec<StockListItem>> {
    let response = client
        .get(EASTMONEY_CLIST_API)
        .query(&[
            ("pn", page.to_string().as_str()),
            ("pz", PAGE_SIZE.to_string().as_str()),
            ("po", "0"),
            ("np", "1"),
            ("fltt", "2"),
            ("invt", "2"),
            ("fid", "f12"),
            ("fs", EASTMONEY_FS_PARAM),
            ("fields", "f12,f14"),
        ])
        .header("User-Agent", BROWSER_UA)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("获取股票列表失败: {}", response.status()));
    }

    let json: serde_json::Value = response.json().await?;
    Ok(parse_list_page(&json))
}

/// 解析列表响应，diff 字段兼容数组和对象两种形态
fn parse_list_page(json: &serde_json::Value) -> Vec<StockListItem> {
    let mut items = Vec::new();
    let diff = json.get("data").and_then(|d| d.get("diff"));
    match diff {
        Some(serde_json::Value::Array(arr)) => {
            for item in arr {
                push_item(&mut items, item);
            }
        }
        Some(serde_json::Value::Object(map)) => {
            for item in map.values() {
                push_item(&mut items, item);
            }
        }
        _ => {}
    }
    items
}

fn push_item(items: &mut Vec<StockListItem>, item: &serde_json::Value) {
    let code = item.get("f12").and_then(|v| v.as_str()).unwrap_or("").trim().to_string();
    let name = item.get("f14").and_then(|v| v.as_str()).unwrap_or("").trim().to_string();
    if !code.is_empty() {
        items.push(StockListItem { code, name });
    }
}

// ==================== 测试模块 ====================
