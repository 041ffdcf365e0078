//! 红利数据同步服务
//!
//! 串联自选股加载、行情抓取与 CSV 落盘，对应三个离线脚本的主流程。
//! 手动触发，单轮抓取，无重试、无调度

use anyhow::Result;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use crate::config::{ApiConfig, DataConfig};
use crate::models::{
    DividendRecord, RefreshStats, SwDividendRecord, DIVIDEND_CSV_HEADERS, SHENWAN_CSV_HEADERS,
};
use crate::services::stock::{eastmoney, legulegu, xueqiu};
use crate::storage::{dividend_store, watchlist_store};

/// 红利数据服务
pub struct DividendService {
    client: Client,
    // 缓存 xq_a_token，一个进程内只取一次
    token_cache: Option<String>,
}

impl DividendService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            token_cache: None,
        }
    }

    /// 按配置的超时参数构建服务
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            token_cache: None,
        })
    }

    /// 获取 xq_a_token：缓存 -> 主页 Cookie -> 内置兜底
    pub async fn xq_token(&mut self) -> String {
        if let Some(ref token) = self.token_cache {
            return token.clone();
        }
        let token = match xueqiu::fetch_xq_token(&self.client).await {
            Some(token) => token,
            None => {
                println!("⚠️ 获取 xq_a_token 失败，使用内置兜底 token");
                xueqiu::default_token()
            }
        };
        self.token_cache = Some(token.clone());
        token
    }

    // ==================== 自选股刷新 ====================

    /// 刷新自选股红利数据
    ///
    /// 整表清空后逐股抓取雪球行情，结束时排序去重重写。
    /// 单支股票失败只跳过，不中断整轮
    pub async fn refresh_watchlist(&mut self, data: &DataConfig) -> Result<RefreshStats> {
        println!("🚀 启动数据源同步程序...");
        let token = self.xq_token().await;

        let watchlist_path = Path::new(&data.watchlist_file);
        let csv_path = Path::new(&data.dividend_csv);
        let stocks = watchlist_store::load_entries(watchlist_path);

        dividend_store::ensure_header(csv_path, &DIVIDEND_CSV_HEADERS)?;
        // 清空旧数据，整轮重抓
        dividend_store::truncate(csv_path, &DIVIDEND_CSV_HEADERS)?;

        let mut stats = RefreshStats::default();
        println!("📥 正在抓取 {} 支自选股的股息率指标...", stocks.len());

        for (i, stock) in stocks.iter().enumerate() {
            let symbol = match xueqiu::symbol_for_quote(&stock.code) {
                Some(symbol) => symbol,
                None => {
                    println!("⚠️ 跳过非A股代码：{}", stock.code);
                    continue;
                }
            };
            stats.valid_codes += 1;

            match xueqiu::get_stock_quote(&self.client, &token, &symbol).await {
                Ok(quote) => {
                    // 放宽条件：股息率为空按 0 保存；价格或市值缺失则跳过
                    if let (Some(price), Some(cap)) = (quote.current, quote.market_capital) {
                        let record = DividendRecord {
                            code: stock.code.clone(),
                            name: stock.name.clone(),
                            latest_price: price,
                            market_cap: (cap / 1e8 * 100.0).round() / 100.0,
                            dividend_yield: quote.dividend_yield.unwrap_or(0.0),
                        };
                        dividend_store::append_record(csv_path, &record)?;
                        stats.fetched += 1;
                    }
                }
                Err(e) => {
                    println!("❌ 处理股票 {} 失败：{}", stock.code, e);
                }
            }

            tokio::time::sleep(Duration::from_millis(data.request_delay_ms)).await;

            if i % 10 == 0 && i > 0 {
                println!(
                    "✅ 已处理 {} 支股票，有效A股 {} 支，成功抓取 {} 支数据...",
                    i, stats.valid_codes, stats.fetched
                );
            }
        }

        if stats.fetched > 0 {
            stats.saved = dividend_store::finalize(csv_path)?;
            println!("\n✨ 任务完成！");
            println!(
                "📊 统计：有效A股 {} 支，去重后实际保存 {} 支数据。",
                stats.valid_codes, stats.saved
            );
            println!("📁 数据已存入 {}，可在看板中查看", data.dividend_csv);
        } else {
            println!("⚠️ 未抓取到有效数据，请检查Token/网络/自选股代码");
        }
        Ok(stats)
    }

    // ==================== 全市场抓取 ====================

    /// 全市场申万抓取
    ///
    /// 遍历申万三级行业成份股，只保留股息率大于 0 的记录，
    /// 已落盘的代码跳过（断点续抓），结束时排序去重
    pub async fn refresh_full_market(&self, data: &DataConfig) -> Result<RefreshStats> {
        println!("🚀 启动乐咕乐股A股股息率抓取程序...");
        let csv_path = Path::new(&data.shenwan_csv);
        dividend_store::ensure_header(csv_path, &SHENWAN_CSV_HEADERS)?;

        let mut crawled = dividend_store::crawled_codes(csv_path)?;
        println!("📌 已抓取过的股票数量：{}", crawled.len());

        let industries = legulegu::sw_index_third_info(&self.client).await?;
        println!("📥 共获取 {} 个申万三级行业，开始遍历抓取...", industries.len());

        let mut stats = RefreshStats::default();
        let mut processed = 0;
        for (i, industry) in industries.iter().enumerate() {
            let constituents = match legulegu::sw_index_third_cons(&self.client, &industry.code).await {
                Ok(constituents) => constituents,
                Err(e) => {
                    println!("❌ 抓取行业 {} 失败：{}", industry.code, e);
                    // 失败时延长等待
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    continue;
                }
            };
            if constituents.is_empty() {
                tokio::time::sleep(Duration::from_millis(500)).await;
                continue;
            }

            for row in &constituents {
                let code = row.code.trim().to_string();
                if crawled.contains(&code) {
                    continue;
                }
                // 只保留有股息的记录
                if row.dividend_yield > 0.0 {
                    let record = SwDividendRecord {
                        code: code.clone(),
                        name: row.name.clone(),
                        latest_price: row.price,
                        market_cap: (row.market_cap * 100.0).round() / 100.0,
                        dividend_yield: row.dividend_yield,
                        sw_level1: row.sw_level1.clone(),
                        sw_level2: row.sw_level2.clone(),
                        sw_level3: row.sw_level3.clone(),
                        pe_ttm: row.pe_ttm,
                        pb: row.pb,
                    };
                    dividend_store::append_record(csv_path, &record)?;
                    stats.fetched += 1;
                    crawled.insert(code);
                }
            }

            processed += 1;
            if i % 10 == 0 {
                println!(
                    "✅ 已处理 {}/{} 个行业，新增 {} 支有股息的股票...",
                    processed,
                    industries.len(),
                    stats.fetched
                );
            }
            tokio::time::sleep(Duration::from_millis(300)).await;
        }

        if stats.fetched > 0 {
            stats.saved = dividend_store::finalize_shenwan(csv_path)?;
            println!("\n✨ 任务完成！累计抓取 {} 支有股息的A股（去重后）。", stats.saved);
            println!("📁 数据已存入 {}，按股息率降序排列", data.shenwan_csv);
        } else {
            println!("⚠️ 未抓取到有效数据，请检查网络或接口是否正常。");
        }
        Ok(stats)
    }

    // ==================== 股票列表 ====================

    /// 拉取全市场 A 股代码名称列表并落盘
    pub async fn refresh_stock_list(&self, data: &DataConfig) -> Result<usize> {
        println!("🚀 启动A股代码列表同步...");
        let items = eastmoney::get_a_stock_list(&self.client).await?;

        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| vec![item.code.clone(), item.name.clone()])
            .collect();
        let path = Path::new(&data.stock_list_csv);
        dividend_store::write_table(path, &["code", "name"], &rows)?;

        println!("💾 数据已保存为 {} 文件", data.stock_list_csv);
        Ok(rows.len())
    }
}

impl Default for DividendService {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== 测试模块 ====================
