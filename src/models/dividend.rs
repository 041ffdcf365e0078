//! 红利数据模型
//!
//! 红利记录以 CSV 落盘（中文表头，带 UTF-8 BOM），唯一键为 code，
//! 整表按股息率降序排列

use serde::{Deserialize, Serialize};

/// 自选股红利数据 CSV 表头
pub const DIVIDEND_CSV_HEADERS: [&str; 5] = ["代码", "名称", "最新价", "总市值(亿)", "股息率(%)"];

/// 申万全市场 CSV 表头（在红利数据基础上附加行业与估值列）
pub const SHENWAN_CSV_HEADERS: [&str; 10] = [
    "代码",
    "名称",
    "最新价",
    "总市值(亿)",
    "股息率(%)",
    "申万1级",
    "申万2级",
    "申万3级",
    "市盈率ttm",
    "市净率",
];

/// 单支股票的红利指标记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendRecord {
    /// 股票代码（6位补零）
    #[serde(rename = "代码")]
    pub code: String,
    /// 股票名称（已去除空格）
    #[serde(rename = "名称")]
    pub name: String,
    /// 最新价
    #[serde(rename = "最新价")]
    pub latest_price: f64,
    /// 总市值，单位亿元
    #[serde(rename = "总市值(亿)")]
    pub market_cap: f64,
    /// 股息率，百分比
    #[serde(rename = "股息率(%)")]
    pub dividend_yield: f64,
}

/// 申万全市场记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwDividendRecord {
    #[serde(rename = "代码")]
    pub code: String,
    #[serde(rename = "名称")]
    pub name: String,
    #[serde(rename = "最新价")]
    pub latest_price: f64,
    #[serde(rename = "总市值(亿)")]
    pub market_cap: f64,
    #[serde(rename = "股息率(%)")]
    pub dividend_yield: f64,
    #[serde(rename = "申万1级")]
    pub sw_level1: String,
    #[serde(rename = "申万2级")]
    pub sw_level2: String,
    #[serde(rename = "申万3级")]
    pub sw_level3: String,
    #[serde(rename = "市盈率ttm")]
    pub pe_ttm: f64,
    #[serde(rename = "市净率")]
    pub pb: f64,
}

/// 红利数据查询参数
#[derive(Debug, Deserialize)]
pub struct DividendQuery {
    /// 最低市值过滤（亿元）
    pub min_market_cap: Option<f64>,
    /// 返回数量限制
    pub limit: Option<usize>,
}

/// 看板顶部概览指标
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    /// 标的池总数
    pub total: usize,
    /// 千亿市值数量
    pub big_cap_count: usize,
    /// 平均股息率
    pub avg_yield: f64,
    /// 最高股息率
    pub max_yield: f64,
    /// 数据日期（北京时间）
    pub data_date: String,
}

/// 一次抓取任务的统计结果
#[derive(Debug, Default, Serialize)]
pub struct RefreshStats {
    /// 有效 A 股代码数
    pub valid_codes: usize,
    /// 成功抓取条数
    pub fetched: usize,
    /// 去重后实际落盘条数
    pub saved: usize,
}
