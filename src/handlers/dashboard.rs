//! 看板页面与健康检查

use actix_web::{web, HttpResponse, Result};
use chrono_tz::Asia::Shanghai;
use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::storage::dividend_store;

/// 看板单页应用（内嵌静态页面）
pub async fn page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../static/dashboard.html"))
}

/// 健康检查：报告红利数据文件状态
pub async fn health(config: web::Data<AppConfig>) -> Result<HttpResponse> {
    let path = Path::new(&config.data.dividend_csv);
    let rows = if path.exists() {
        dividend_store::load_records(path).map(|r| r.len()).unwrap_or(0)
    } else {
        0
    };
    // 数据文件最后更新时间（北京时间）
    let updated_at = fs::metadata(path)
        .ok()
        .and_then(|meta| meta.modified().ok())
        .map(|time| {
            chrono::DateTime::<chrono::Utc>::from(time)
                .with_timezone(&Shanghai)
                .to_rfc3339()
        });

    let status = serde_json::json!({
        "data_file": config.data.dividend_csv,
        "exists": path.exists(),
        "rows": rows,
        "updated_at": updated_at,
    });
    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
