//! 自选股接口
//!
//! 看板侧的自选股读写路径：读取代码列表、整体保存、单支添加，
//! 以及自选股对应的红利行情

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::AppConfig;
use crate::models::watchlist::parse_watchlist_input;
use crate::models::{ApiResponse, DividendRecord, WatchlistEntry, UNKNOWN_NAME};
use crate::storage::{dividend_store, watchlist_store};

/// 整体保存请求：输入框原始文本（换行或逗号分隔的代码）
#[derive(Debug, Deserialize)]
pub struct SaveWatchlistRequest {
    pub input: String,
}

/// 单支添加请求
#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    pub code: String,
    pub name: String,
}

/// 红利数据中的代码到名称映射（数据缺失时为空表）
fn name_map(config: &AppConfig) -> HashMap<String, String> {
    let path = Path::new(&config.data.dividend_csv);
    dividend_store::load_records(path)
        .map(|records| {
            records
                .into_iter()
                .map(|r| (r.code, r.name))
                .collect()
        })
        .unwrap_or_default()
}

/// 查询自选股列表
///
/// 代码取看板加载路径（缺失回退默认），名称从红利数据回填
pub async fn get_watchlist(config: web::Data<AppConfig>) -> Result<HttpResponse> {
    let path = Path::new(&config.data.watchlist_file);
    let codes = watchlist_store::load_codes(path);
    let names = name_map(&config);
    let entries: Vec<WatchlistEntry> = codes
        .iter()
        .map(|code| {
            let name = names.get(code).cloned().unwrap_or_else(|| UNKNOWN_NAME.to_string());
            WatchlistEntry::new(code, &name)
        })
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}

/// 整体保存自选股
pub async fn save_watchlist(
    config: web::Data<AppConfig>,
    body: web::Json<SaveWatchlistRequest>,
) -> Result<HttpResponse> {
    let codes = parse_watchlist_input(&body.input);
    let names = name_map(&config);
    let path = Path::new(&config.data.watchlist_file);

    match watchlist_store::save_codes(path, &codes, &names) {
        Ok(entries) => {
            let message = format!("自选股已保存，共 {} 支标的", entries.len());
            Ok(HttpResponse::Ok().json(ApiResponse::with_message(entries, message)))
        }
        Err(e) => {
            let response = ApiResponse::<Vec<WatchlistEntry>>::error(format!("保存自选股失败：{}", e));
            Ok(HttpResponse::InternalServerError().json(response))
        }
    }
}

/// 添加单支自选股，代码已存在时不改动
pub async fn add_stock(
    config: web::Data<AppConfig>,
    body: web::Json<AddWatchlistRequest>,
) -> Result<HttpResponse> {
    let path = Path::new(&config.data.watchlist_file);
    match watchlist_store::add_entry(path, &body.code, &body.name) {
        Ok((entries, added)) => {
            let message = if added {
                "新增自选股成功".to_string()
            } else {
                "标的已在自选股中，无需重复添加".to_string()
            };
            Ok(HttpResponse::Ok().json(ApiResponse::with_message(entries, message)))
        }
        Err(e) => {
            let response = ApiResponse::<Vec<WatchlistEntry>>::error(e.to_string());
            Ok(HttpResponse::InternalServerError().json(response))
        }
    }
}

/// 自选股红利行情
///
/// 返回红利数据中命中自选股代码的记录，保持股息率降序
pub async fn watchlist_quotes(config: web::Data<AppConfig>) -> Result<HttpResponse> {
    let csv_path = Path::new(&config.data.dividend_csv);
    if !csv_path.exists() {
        let response = ApiResponse::<Vec<DividendRecord>>::error(
            "未找到数据文件，请先运行数据更新脚本".to_string(),
        );
        return Ok(HttpResponse::NotFound().json(response));
    }

    let watchlist_path = Path::new(&config.data.watchlist_file);
    let codes: HashSet<String> = watchlist_store::load_codes(watchlist_path).into_iter().collect();

    match dividend_store::load_records(csv_path) {
        Ok(mut records) => {
            records.retain(|r| codes.contains(&r.code));
            Ok(HttpResponse::Ok().json(ApiResponse::success(records)))
        }
        Err(e) => {
            let response = ApiResponse::<Vec<DividendRecord>>::error(e.to_string());
            Ok(HttpResponse::InternalServerError().json(response))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/watchlist")
            .route("", web::get().to(get_watchlist))
            .route("", web::put().to(save_watchlist))
            .route("", web::post().to(add_stock))
            .route("/quotes", web::get().to(watchlist_quotes)),
    );
}
