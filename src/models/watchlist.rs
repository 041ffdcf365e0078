//! 自选股数据模型与规范化逻辑
//!
//! 自选股以 `{code, name}` 形式持久化：code 为6位补零字符串，name 去除所有空格。
//! 看板进程和离线抓取进程各自读写同一个 JSON 文件，
//! 因此所有读写路径都必须经过同样的规范化和去重，文件才能保持收敛形态。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 名称缺失或无法匹配时的占位符
pub const UNKNOWN_NAME: &str = "未知名称";

/// 自选股条目
///
/// 唯一键为 code，列表顺序即首次加入顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// 股票代码（6位补零）
    pub code: String,
    /// 股票名称（已去除空格）
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    UNKNOWN_NAME.to_string()
}

impl WatchlistEntry {
    /// 构造条目并完成规范化
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: normalize_code(code),
            name: clean_name(name),
        }
    }
}

/// 规范化股票代码：去除首尾空白并左侧补零到6位
///
/// 超过6位的代码保持原样，不截断
pub fn normalize_code(code: &str) -> String {
    format!("{:0>6}", code.trim())
}

/// 清洗股票名称：去除所有空格
pub fn clean_name(name: &str) -> String {
    name.replace(' ', "")
}

/// 解析看板输入框文本
///
/// 换行和逗号均视为分隔符，逐项去空白、转大写、补零，保序去重
pub fn parse_watchlist_input(input: &str) -> Vec<String> {
    let upper = input.to_uppercase().replace('\n', ",");
    let mut codes = Vec::new();
    let mut seen = HashSet::new();
    for token in upper.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let code = normalize_code(token);
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }
    codes
}

/// 代码列表保序去重
pub fn dedup_codes(codes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    codes.into_iter().filter(|c| seen.insert(c.clone())).collect()
}

/// 条目列表规范化后按代码去重（保留首次出现）
pub fn dedup_entries(entries: Vec<WatchlistEntry>) -> Vec<WatchlistEntry> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for entry in entries {
        let entry = WatchlistEntry::new(&entry.code, &entry.name);
        if seen.insert(entry.code.clone()) {
            result.push(entry);
        }
    }
    result
}

// ==================== 测试模块 ====================

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试代码补零
    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("1"), "000001");
        assert_eq!(normalize_code("600036"), "600036");
        assert_eq!(normalize_code("  600036  "), "600036");
        assert_eq!(normalize_code("36"), "000036");
        // 超长代码不截断
        assert_eq!(normalize_code("12345678"), "12345678");
    }

    /// 测试名称清洗
    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("万 科Ａ"), "万科Ａ");
        assert_eq!(clean_name(" 浦发银行 "), "浦发银行");
        assert_eq!(clean_name("平安银行"), "平安银行");
    }

    /// 测试输入框解析：逗号、换行混合分隔 + 保序去重
    #[test]
    fn test_parse_watchlist_input() {
        let input = "600036, 1\n000001,,  601398 \n600036";
        let codes = parse_watchlist_input(input);
        println!("解析结果: {:?}", codes);
        assert_eq!(codes, vec!["600036", "000001", "601398"]);
    }

    /// 测试输入框解析：空输入
    #[test]
    fn test_parse_watchlist_input_empty() {
        assert!(parse_watchlist_input("").is_empty());
        assert!(parse_watchlist_input(" , \n , ").is_empty());
    }

    /// 测试条目去重保留首次出现
    #[test]
    fn test_dedup_entries_keeps_first() {
        let entries = vec![
            WatchlistEntry { code: "600036".to_string(), name: "招商银行".to_string() },
            WatchlistEntry { code: "36".to_string(), name: "别名".to_string() },
            WatchlistEntry { code: "600036".to_string(), name: "重复".to_string() },
        ];
        let result = dedup_entries(entries);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].code, "600036");
        assert_eq!(result[0].name, "招商银行");
        assert_eq!(result[1].code, "000036");
    }

    /// 测试条目规范化（补零 + 去空格）
    #[test]
    fn test_entry_new_normalizes() {
        let entry = WatchlistEntry::new(" 858 ", "五 粮 液");
        assert_eq!(entry.code, "000858");
        assert_eq!(entry.name, "五粮液");
    }
}
