//! 自选股 JSON 文件持久化
//!
//! 看板和抓取脚本是两条独立的读写路径，各自带不同的默认标的；
//! 任何一侧加载失败都降级为默认列表而不是报错。

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::models::watchlist::{dedup_codes, dedup_entries, normalize_code};
use crate::models::{WatchlistEntry, UNKNOWN_NAME};

/// 看板侧默认自选股（只有代码，名称由红利数据回填）
pub const DEFAULT_WATCHLIST_CODES: [&str; 4] = ["600036", "601398", "000001", "601939"];

/// 抓取脚本侧默认自选股
pub fn default_entries() -> Vec<WatchlistEntry> {
    vec![
        WatchlistEntry::new("600000", "浦发银行"),
        WatchlistEntry::new("000001", "平安银行"),
        WatchlistEntry::new("601318", "中国平安"),
    ]
}

/// 看板路径：加载自选股代码列表
///
/// 文件缺失、解析失败或结果为空时回退到默认代码列表
pub fn load_codes(path: &Path) -> Vec<String> {
    let defaults = || DEFAULT_WATCHLIST_CODES.iter().map(|c| c.to_string()).collect();
    match read_entries(path) {
        Ok(Some(entries)) => {
            let codes = dedup_codes(entries.iter().map(|e| normalize_code(&e.code)).collect());
            if codes.is_empty() {
                defaults()
            } else {
                codes
            }
        }
        Ok(None) => defaults(),
        Err(e) => {
            log::warn!("加载自选股失败，使用默认列表: {}", e);
            defaults()
        }
    }
}

/// 抓取路径：加载自选股条目
///
/// 文件不存在时写入并返回默认标的；内容异常时返回默认标的（不写回）
pub fn load_entries(path: &Path) -> Vec<WatchlistEntry> {
    if !path.exists() {
        let defaults = default_entries();
        match save_entries(path, defaults.clone()) {
            Ok(_) => println!("📄 本地自选股文件不存在，已初始化默认标的"),
            Err(e) => println!("❌ 初始化自选股文件失败：{}", e),
        }
        return defaults;
    }
    match read_entries(path) {
        Ok(Some(entries)) if !entries.is_empty() => {
            let entries = dedup_entries(entries);
            println!("✅ 成功加载本地自选股，去重后共 {} 支标的", entries.len());
            entries
        }
        Ok(_) => {
            println!("⚠️ 本地自选股文件格式异常，使用默认标的");
            default_entries()
        }
        Err(e) => {
            println!("❌ 加载自选股失败：{}，使用默认标的", e);
            default_entries()
        }
    }
}

/// 读取 JSON 文件中的条目，不做去重
///
/// 文件不存在返回 `None`；缺 code 的条目跳过；code 兼容数字写法
fn read_entries(path: &Path) -> Result<Option<Vec<WatchlistEntry>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let items = value
        .as_array()
        .ok_or_else(|| anyhow!("自选股文件不是 JSON 数组"))?;

    let mut entries = Vec::new();
    for item in items {
        let code = match item.get("code") {
            Some(v) if v.is_string() => v.as_str().unwrap_or_default().to_string(),
            Some(v) if v.is_number() => v.to_string(),
            _ => continue,
        };
        let name = item
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(UNKNOWN_NAME);
        entries.push(WatchlistEntry::new(&code, name));
    }
    Ok(Some(entries))
}

/// 保存自选股条目：规范化 + 去重后整体覆盖
///
/// 返回实际写入的条目列表
pub fn save_entries(path: &Path, entries: Vec<WatchlistEntry>) -> Result<Vec<WatchlistEntry>> {
    let entries = dedup_entries(entries);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(path, json)?;
    Ok(entries)
}

/// 看板保存路径：代码列表 + 名称回填
///
/// 名称从红利数据中按代码匹配，匹配不到时用占位名称
pub fn save_codes(
    path: &Path,
    codes: &[String],
    names: &HashMap<String, String>,
) -> Result<Vec<WatchlistEntry>> {
    let entries = codes
        .iter()
        .map(|c| {
            let code = normalize_code(c);
            let name = names.get(&code).cloned().unwrap_or_else(|| UNKNOWN_NAME.to_string());
            WatchlistEntry::new(&code, &name)
        })
        .collect();
    save_entries(path, entries)
}

/// 新增自选股，代码已存在时保持文件不变
///
/// 返回 (最新条目列表, 是否实际新增)
pub fn add_entry(path: &Path, code: &str, name: &str) -> Result<(Vec<WatchlistEntry>, bool)> {
    let mut entries = load_entries(path);
    let entry = WatchlistEntry::new(code, name);
    if entries.iter().any(|e| e.code == entry.code) {
        println!("⚠️ 标的 {}({}) 已在自选股中，无需重复添加", entry.code, entry.name);
        return Ok((entries, false));
    }
    println!("✅ 新增自选股：{}({})", entry.code, entry.name);
    entries.push(entry);
    let saved = save_entries(path, entries)?;
    Ok((saved, true))
}

// ==================== 测试模块 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// 测试看板路径：文件缺失回退默认代码
    #[test]
    fn test_load_codes_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        let codes = load_codes(&path);
        assert_eq!(codes, vec!["600036", "601398", "000001", "601939"]);
        // 看板路径不初始化文件
        assert!(!path.exists());
    }

    /// 测试看板路径：加载时补零去重
    #[test]
    fn test_load_codes_normalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        fs::write(
            &path,
            r#"[{"code": "1", "name": "平安银行"}, {"code": "000001"}, {"code": "600036", "name": "招商银行"}]"#,
        )
        .unwrap();
        let codes = load_codes(&path);
        assert_eq!(codes, vec!["000001", "600036"]);
    }

    /// 测试看板路径：损坏文件回退默认
    #[test]
    fn test_load_codes_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        fs::write(&path, "not json {{{").unwrap();
        let codes = load_codes(&path);
        assert_eq!(codes.len(), 4);
    }

    /// 测试抓取路径：文件缺失时初始化默认标的
    #[test]
    fn test_load_entries_initializes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        let entries = load_entries(&path);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].code, "600000");
        // 抓取路径会写回默认标的
        assert!(path.exists());
        let reloaded = load_entries(&path);
        assert_eq!(reloaded, entries);
    }

    /// 测试抓取路径：非数组内容返回默认且不覆盖原文件
    #[test]
    fn test_load_entries_invalid_content_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        fs::write(&path, r#"{"code": "600036"}"#).unwrap();
        let entries = load_entries(&path);
        assert_eq!(entries, default_entries());
        // 异常内容保持原样
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('{'));
    }

    /// 测试保存与加载的收敛性：补零、去空格、去重
    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        let entries = vec![
            WatchlistEntry { code: "858".to_string(), name: "五 粮 液".to_string() },
            WatchlistEntry { code: "000858".to_string(), name: "重复".to_string() },
            WatchlistEntry { code: "600519".to_string(), name: "贵州茅台".to_string() },
        ];
        let saved = save_entries(&path, entries).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].code, "000858");
        assert_eq!(saved[0].name, "五粮液");

        let loaded = load_entries(&path);
        assert_eq!(loaded, saved);
    }

    /// 测试数字写法的代码兼容
    #[test]
    fn test_numeric_code_in_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        fs::write(&path, r#"[{"code": 600036, "name": "招商银行"}]"#).unwrap();
        let entries = load_entries(&path);
        assert_eq!(entries[0].code, "600036");
    }

    /// 测试看板保存路径：名称回填与占位
    #[test]
    fn test_save_codes_backfills_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");
        let mut names = HashMap::new();
        names.insert("600036".to_string(), "招商银行".to_string());

        let codes = vec!["600036".to_string(), "1".to_string()];
        let saved = save_codes(&path, &codes, &names).unwrap();
        assert_eq!(saved[0].name, "招商银行");
        assert_eq!(saved[1].code, "000001");
        assert_eq!(saved[1].name, UNKNOWN_NAME);
    }

    /// 测试新增自选股：重复代码不改动文件
    #[test]
    fn test_add_entry_skips_duplicate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("self_selected_stocks.json");

        let (entries, added) = add_entry(&path, "600519", "贵州茅台").unwrap();
        assert!(added);
        assert_eq!(entries.len(), 4);

        let (entries, added) = add_entry(&path, " 600519 ", "贵州 茅台").unwrap();
        assert!(!added);
        assert_eq!(entries.len(), 4);
    }
}
