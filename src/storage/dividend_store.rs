//! 红利数据 CSV 持久化
//!
//! CSV 带 UTF-8 BOM（utf-8-sig），Excel 直接打开不乱码。
//! 抓取过程逐条追加，收尾时整表读回、排序、去重、重写。

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::models::watchlist::{clean_name, normalize_code};
use crate::models::{DividendRecord, DIVIDEND_CSV_HEADERS, SHENWAN_CSV_HEADERS};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// 初始化或修复 CSV 表头
///
/// 文件缺失时创建仅含表头的文件；首行不是期望表头时，
/// 把现有内容全部当作数据行，在其上补写表头；文件无法读取时重新初始化
pub fn ensure_header(path: &Path, headers: &[&str]) -> Result<()> {
    if !path.exists() {
        write_table(path, headers, &[])?;
        println!("📄 初始化CSV文件，已写入表头：{:?}", headers);
        return Ok(());
    }
    match read_raw_rows(path) {
        Ok(rows) => {
            let header_ok = rows
                .first()
                .map(|row| row.iter().map(String::as_str).eq(headers.iter().copied()))
                .unwrap_or(false);
            if !header_ok {
                write_table(path, headers, &rows)?;
                println!("🔧 修复CSV表头，已更新为：{:?}", headers);
            }
            Ok(())
        }
        Err(_) => {
            write_table(path, headers, &[])?;
            println!("🔧 CSV文件异常，重新初始化并写入表头：{:?}", headers);
            Ok(())
        }
    }
}

/// 清空数据行，仅保留表头
pub fn truncate(path: &Path, headers: &[&str]) -> Result<()> {
    write_table(path, headers, &[])
}

/// 追加一条记录（不写表头）
pub fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

/// 读取红利数据：补零、清洗名称、按代码去重（保留首次出现）
///
/// 数值列宽松解析，解析失败按 0 处理
pub fn load_records(path: &Path) -> Result<Vec<DividendRecord>> {
    let raw = load_records_raw(path)?;
    let mut seen = HashSet::new();
    Ok(raw.into_iter().filter(|r| seen.insert(r.code.clone())).collect())
}

/// 读取红利数据，规范化但不去重（收尾排序用）
fn load_records_raw(path: &Path) -> Result<Vec<DividendRecord>> {
    let rows = data_rows(path, &DIVIDEND_CSV_HEADERS)?;
    let mut records = Vec::new();
    for row in rows {
        if row.len() < 5 {
            continue;
        }
        records.push(DividendRecord {
            code: normalize_code(&row[0]),
            name: clean_name(&row[1]),
            latest_price: row[2].trim().parse().unwrap_or(0.0),
            market_cap: row[3].trim().parse().unwrap_or(0.0),
            dividend_yield: row[4].trim().parse().unwrap_or(0.0),
        });
    }
    Ok(records)
}

/// 收尾：整表读回，按股息率降序排序，按代码去重后重写
///
/// 先排序再去重，同一代码保留股息率最高的一条。返回落盘条数
pub fn finalize(path: &Path) -> Result<usize> {
    let mut records = load_records_raw(path)?;
    records.sort_by(|a, b| {
        b.dividend_yield
            .partial_cmp(&a.dividend_yield)
            .unwrap_or(Ordering::Equal)
    });
    let mut seen = HashSet::new();
    records.retain(|r| seen.insert(r.code.clone()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.code.clone(),
                r.name.clone(),
                r.latest_price.to_string(),
                r.market_cap.to_string(),
                r.dividend_yield.to_string(),
            ]
        })
        .collect();
    write_table(path, &DIVIDEND_CSV_HEADERS, &rows)?;
    Ok(rows.len())
}

/// 申万全市场 CSV 收尾：按股息率降序、按代码去重后重写
///
/// 与自选股收尾不同，这里不做代码补零和名称清洗，行内容原样保留
pub fn finalize_shenwan(path: &Path) -> Result<usize> {
    let mut rows = data_rows(path, &SHENWAN_CSV_HEADERS)?;
    rows.retain(|row| row.len() >= 5);
    rows.sort_by(|a, b| {
        let ya: f64 = a[4].trim().parse().unwrap_or(0.0);
        let yb: f64 = b[4].trim().parse().unwrap_or(0.0);
        yb.partial_cmp(&ya).unwrap_or(Ordering::Equal)
    });
    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert(row[0].clone()));
    write_table(path, &SHENWAN_CSV_HEADERS, &rows)?;
    Ok(rows.len())
}

/// 已落盘的股票代码集合（断点续抓用，代码按原样比较）
pub fn crawled_codes(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let rows = data_rows(path, &SHENWAN_CSV_HEADERS).unwrap_or_default();
    Ok(rows
        .into_iter()
        .filter_map(|row| row.first().map(|c| c.trim().to_string()))
        .filter(|c| !c.is_empty())
        .collect())
}

/// 整表重写：BOM + 表头 + 数据行
pub fn write_table(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = fs::File::create(path)?;
    file.write_all(UTF8_BOM)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// 读取全部行（含表头行），BOM 容忍
fn read_raw_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let bytes = fs::read(path)?;
    let (text, _, _) = encoding_rs::UTF_8.decode(&bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}

/// 读取数据行：文件缺失报错，首行为期望表头时跳过
fn data_rows(path: &Path, headers: &[&str]) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Err(anyhow!("未找到数据文件 {}", path.display()));
    }
    let mut rows = read_raw_rows(path)?;
    let has_header = rows
        .first()
        .map(|row| row.iter().map(String::as_str).eq(headers.iter().copied()))
        .unwrap_or(false);
    if has_header {
        rows.remove(0);
    }
    Ok(rows)
}

// ==================== 测试模块 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(code: &str, name: &str, price: f64, cap: f64, yield_pct: f64) -> DividendRecord {
        DividendRecord {
            code: code.to_string(),
            name: name.to_string(),
            latest_price: price,
            market_cap: cap,
            dividend_yield: yield_pct,
        }
    }

    /// 测试初始化：BOM + 表头
    #[test]
    fn test_ensure_header_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data/dividend_data.csv");
        ensure_header(&path, &DIVIDEND_CSV_HEADERS).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8_lossy(&bytes[3..]).to_string();
        assert!(text.starts_with("代码,名称,最新价,总市值(亿),股息率(%)"));
    }

    /// 测试表头修复：无表头的旧文件，数据行保留
    #[test]
    fn test_ensure_header_repairs_headerless_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dividend_data.csv");
        fs::write(&path, "600036,招商银行,33.5,8000,5.2\n").unwrap();

        ensure_header(&path, &DIVIDEND_CSV_HEADERS).unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "600036");
        assert_eq!(records[0].dividend_yield, 5.2);
    }

    /// 测试追加与读取：补零代码以字符串形式保留
    #[test]
    fn test_append_and_load_keeps_leading_zeros() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dividend_data.csv");
        ensure_header(&path, &DIVIDEND_CSV_HEADERS).unwrap();

        append_record(&path, &record("000001", "平安银行", 11.5, 2200.0, 4.1)).unwrap();
        append_record(&path, &record("600036", "招商 银行", 33.5, 8000.0, 5.2)).unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "000001");
        // 名称在读取侧清洗空格
        assert_eq!(records[1].name, "招商银行");
    }

    /// 测试收尾：按股息率降序 + 同代码保留最高股息率
    #[test]
    fn test_finalize_sorts_and_dedups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dividend_data.csv");
        ensure_header(&path, &DIVIDEND_CSV_HEADERS).unwrap();

        append_record(&path, &record("600036", "招商银行", 33.5, 8000.0, 5.2)).unwrap();
        append_record(&path, &record("601398", "工商银行", 5.6, 19000.0, 6.1)).unwrap();
        append_record(&path, &record("600036", "招商银行", 32.0, 7900.0, 5.9)).unwrap();

        let saved = finalize(&path).unwrap();
        assert_eq!(saved, 2);

        let records = load_records(&path).unwrap();
        assert_eq!(records[0].code, "601398");
        assert_eq!(records[0].dividend_yield, 6.1);
        // 同代码去重保留股息率更高的一条
        let cmb = records.iter().find(|r| r.code == "600036").unwrap();
        assert_eq!(cmb.dividend_yield, 5.9);
    }

    /// 测试清空数据行
    #[test]
    fn test_truncate_leaves_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dividend_data.csv");
        ensure_header(&path, &DIVIDEND_CSV_HEADERS).unwrap();
        append_record(&path, &record("600036", "招商银行", 33.5, 8000.0, 5.2)).unwrap();

        truncate(&path, &DIVIDEND_CSV_HEADERS).unwrap();
        let records = load_records(&path).unwrap();
        assert!(records.is_empty());
    }

    /// 测试缺失文件读取报错
    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        assert!(load_records(&path).is_err());
    }

    /// 测试数值列宽松解析
    #[test]
    fn test_lenient_numeric_parsing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dividend_data.csv");
        fs::write(
            &path,
            "代码,名称,最新价,总市值(亿),股息率(%)\n600036,招商银行,abc,8000,5.2\n",
        )
        .unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records[0].latest_price, 0.0);
        assert_eq!(records[0].market_cap, 8000.0);
    }

    /// 测试断点续抓的已抓代码集合
    #[test]
    fn test_crawled_codes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dividend_data_shenwan.csv");
        assert!(crawled_codes(&path).unwrap().is_empty());

        ensure_header(&path, &SHENWAN_CSV_HEADERS).unwrap();
        let row = vec![
            "600519".to_string(),
            "贵州茅台".to_string(),
            "1500".to_string(),
            "19000".to_string(),
            "2.5".to_string(),
            "食品饮料".to_string(),
            "白酒".to_string(),
            "白酒Ⅲ".to_string(),
            "25".to_string(),
            "8".to_string(),
        ];
        write_table(&path, &SHENWAN_CSV_HEADERS, &[row]).unwrap();

        let codes = crawled_codes(&path).unwrap();
        assert!(codes.contains("600519"));
        assert_eq!(codes.len(), 1);
    }

    /// 测试申万收尾：排序去重但不改写行内容
    #[test]
    fn test_finalize_shenwan() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dividend_data_shenwan.csv");
        ensure_header(&path, &SHENWAN_CSV_HEADERS).unwrap();

        let make_row = |code: &str, yield_pct: &str| -> Vec<String> {
            vec![
                code.to_string(),
                "某股票".to_string(),
                "10".to_string(),
                "100".to_string(),
                yield_pct.to_string(),
                "一级".to_string(),
                "二级".to_string(),
                "三级".to_string(),
                "15".to_string(),
                "1.2".to_string(),
            ]
        };
        append_record_rows(&path, &[make_row("600000", "3.0"), make_row("000001", "4.5"), make_row("600000", "2.0")]);

        let saved = finalize_shenwan(&path).unwrap();
        assert_eq!(saved, 2);
        let rows = data_rows(&path, &SHENWAN_CSV_HEADERS).unwrap();
        assert_eq!(rows[0][0], "000001");
        assert_eq!(rows[1][0], "600000");
        assert_eq!(rows[1][4], "3.0");
    }

    fn append_record_rows(path: &Path, rows: &[Vec<String>]) {
        let file = fs::OpenOptions::new().append(true).open(path).unwrap();
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        for row in rows {
            writer.write_record(row).unwrap();
        }
        writer.flush().unwrap();
    }
}
