//! HTTP 请求处理器

pub mod dashboard;
pub mod dividend;
pub mod watchlist;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(dashboard::config)
            .configure(dividend::config)
            .configure(watchlist::config),
    );
}
