//! 乐咕乐股申万行业数据
//!
//! 抓取申万三级行业列表与行业成份股（含股息率、市盈率、市净率），
//! 数据来源: https://legulegu.com/stockdata/sw-industry-overview

use anyhow::{anyhow, Result};
use reqwest::Client;
use scraper::{Html, Selector};

use super::BROWSER_UA;

/// 申万行业总览页（三级行业列表）
const SW_OVERVIEW_URL: &str = "https://legulegu.com/stockdata/sw-industry-overview";
/// 行业成份页
const SW_COMPOSITION_URL: &str = "https://legulegu.com/stockdata/index-composition";

/// 申万三级行业
#[derive(Debug, Clone)]
pub struct SwIndustry {
    /// 行业代码，如 801120.SI
    pub code: String,
    /// 行业名称
    pub name: String,
}

/// 行业成份股（按成份页表格列解析）
#[derive(Debug, Clone)]
pub struct SwConstituent {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub pe: f64,
    pub pe_ttm: f64,
    pub pb: f64,
    /// 股息率（%），页面上带百分号
    pub dividend_yield: f64,
    /// 市值（亿）
    pub market_cap: f64,
    pub sw_level1: String,
    pub sw_level2: String,
    pub sw_level3: String,
}

/// 获取所有申万三级行业
pub async fn sw_index_third_info(client: &Client) -> Result<Vec<SwIndustry>> {
    println!("📡 请求申万行业列表 URL: {}", SW_OVERVIEW_URL);
    let response = client
        .get(SW_OVERVIEW_URL)
        .header("User-Agent", BROWSER_UA)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("获取申万行业列表失败: {}", response.status()));
    }

    let text = response.text().await?;
    parse_industry_overview(&text)
}

/// 解析行业总览页
///
/// 三级行业在 div#level3Items 内，行业代码在 .lg-industries-item-chinese-title，
/// 行业名称在 .lg-industries-item-number（格式"行业名(成份数)"）
fn parse_industry_overview(html: &str) -> Result<Vec<SwIndustry>> {
    let document = Html::parse_document(html);
    let container_sel = Selector::parse("div#level3Items").unwrap();
    let code_sel = Selector::parse("div.lg-industries-item-chinese-title").unwrap();
    let name_sel = Selector::parse("div.lg-industries-item-number").unwrap();

    let container = document
        .select(&container_sel)
        .next()
        .ok_or_else(|| anyhow!("未找到行业列表(#level3Items)"))?;

    let codes: Vec<String> = container
        .select(&code_sel)
        .map(|el| el.text().collect::<Vec<_>>().join("").trim().to_string())
        .collect();
    let names: Vec<String> = container
        .select(&name_sel)
        .map(|el| {
            let text = el.text().collect::<Vec<_>>().join("");
            text.split('(').next().unwrap_or("").trim().to_string()
        })
        .collect();

    let industries: Vec<SwIndustry> = codes
        .into_iter()
        .enumerate()
        .map(|(i, code)| SwIndustry {
            code,
            name: names.get(i).cloned().unwrap_or_default(),
        })
        .filter(|ind| !ind.code.is_empty())
        .collect();

    if industries.is_empty() {
        return Err(anyhow!("行业列表为空，页面结构可能已变化"));
    }
    println!("📊 解析到 {} 个申万三级行业", industries.len());
    Ok(industries)
}

/// 抓取指定申万三级行业下的所有成份股
pub async fn sw_index_third_cons(client: &Client, industry_code: &str) -> Result<Vec<SwConstituent>> {
    let url = format!("{}?industryCode={}", SW_COMPOSITION_URL, industry_code);
    let response = client
        .get(&url)
        .header("User-Agent", BROWSER_UA)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("获取行业 {} 成份失败: {}", industry_code, response.status()));
    }

    let text = response.text().await?;
    parse_index_composition(&text)
}

/// 解析成份页的第一张表格
///
/// 列依次为：序号、股票代码、股票简称、纳入时间、申万1级、申万2级、申万3级、
/// 价格、市盈率、市盈率ttm、市净率、股息率、市值、…（同比增长列忽略）
fn parse_index_composition(html: &str) -> Result<Vec<SwConstituent>> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let tr_sel = Selector::parse("tr").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| anyhow!("未找到成份股表格"))?;

    let mut constituents = Vec::new();
    for row in table.select(&tr_sel) {
        let cells: Vec<String> = row
            .select(&td_sel)
            .map(|cell| {
                cell.text()
                    .collect::<Vec<_>>()
                    .join("")
                    .replace('\u{a0}', "")
                    .trim()
                    .to_string()
            })
            .collect();

        if cells.len() < 13 {
            continue;
        }
        // 跳过混入数据区的表头行
        if cells[1] == "股票代码" || cells[0] == "序号" {
            continue;
        }

        let parse_num = |s: &str| -> f64 {
            s.trim_matches('%').replace(',', "").trim().parse().unwrap_or(0.0)
        };

        constituents.push(SwConstituent {
            code: cells[1].clone(),
            name: cells[2].clone(),
            sw_level1: cells[4].clone(),
            sw_level2: cells[5].clone(),
            sw_level3: cells[6].clone(),
            price: parse_num(&cells[7]),
            pe: parse_num(&cells[8]),
            pe_ttm: parse_num(&cells[9]),
            pb: parse_num(&cells[10]),
            dividend_yield: parse_num(&cells[11]),
            market_cap: parse_num(&cells[12]),
        });
    }

    Ok(constituents)
}

// ==================== 测试模块 ====================
