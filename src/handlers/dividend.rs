//! 红利数据接口

use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use chrono_tz::Asia::Shanghai;
use std::cmp::Ordering;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::{ApiResponse, DashboardSummary, DividendQuery, DividendRecord};
use crate::storage::dividend_store;

/// 数据文件缺失时的提示
const MISSING_DATA_HINT: &str = "未找到数据文件 dividend_data.csv，请先运行数据更新脚本";

/// 查询红利数据表
///
/// 支持最低市值过滤和条数限制，始终按股息率降序返回
pub async fn list_dividends(
    config: web::Data<AppConfig>,
    query: web::Query<DividendQuery>,
) -> Result<HttpResponse> {
    let path = Path::new(&config.data.dividend_csv);
    if !path.exists() {
        let response = ApiResponse::<Vec<DividendRecord>>::error(MISSING_DATA_HINT.to_string());
        return Ok(HttpResponse::NotFound().json(response));
    }

    match dividend_store::load_records(path) {
        Ok(mut records) => {
            // 文件本应有序，这里兜底再排一次
            records.sort_by(|a, b| {
                b.dividend_yield
                    .partial_cmp(&a.dividend_yield)
                    .unwrap_or(Ordering::Equal)
            });
            if let Some(min_cap) = query.min_market_cap {
                records.retain(|r| r.market_cap >= min_cap);
            }
            if let Some(limit) = query.limit {
                records.truncate(limit);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(records)))
        }
        Err(e) => {
            let response = ApiResponse::<Vec<DividendRecord>>::error(e.to_string());
            Ok(HttpResponse::InternalServerError().json(response))
        }
    }
}

/// 看板顶部概览指标
pub async fn summary(config: web::Data<AppConfig>) -> Result<HttpResponse> {
    let path = Path::new(&config.data.dividend_csv);
    if !path.exists() {
        let response = ApiResponse::<DashboardSummary>::error(MISSING_DATA_HINT.to_string());
        return Ok(HttpResponse::NotFound().json(response));
    }

    match dividend_store::load_records(path) {
        Ok(records) => {
            let total = records.len();
            let big_cap_count = records.iter().filter(|r| r.market_cap >= 1000.0).count();
            let (avg_yield, max_yield) = if total > 0 {
                let sum: f64 = records.iter().map(|r| r.dividend_yield).sum();
                let max = records
                    .iter()
                    .map(|r| r.dividend_yield)
                    .fold(f64::MIN, f64::max);
                (sum / total as f64, max)
            } else {
                (0.0, 0.0)
            };

            let summary = DashboardSummary {
                total,
                big_cap_count,
                avg_yield,
                max_yield,
                data_date: Utc::now().with_timezone(&Shanghai).format("%Y-%m-%d").to_string(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
        }
        Err(e) => {
            let response = ApiResponse::<DashboardSummary>::error(e.to_string());
            Ok(HttpResponse::InternalServerError().json(response))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dividend")
            .route("", web::get().to(list_dividends))
            .route("/summary", web::get().to(summary)),
    );
}
