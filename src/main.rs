//! A股红利看板后端服务
//!
//! 托管看板页面，提供红利数据查询和自选股管理的 RESTful API
//! 数据来源：雪球、乐咕乐股、东方财富（由离线脚本抓取落盘）

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use dividend_backend::config::AppConfig;
use dividend_backend::handlers::{self, dashboard};
use dividend_backend::middleware::ApiKeyMiddleware;

/// 应用程序入口
///
/// 启动 HTTP 服务器，监听地址和端口来自 config.json（默认 0.0.0.0:8501）
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load();
    // 初始化日志系统，日志级别来自配置，RUST_LOG 环境变量可覆盖
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    if config.api.api_key.is_empty() {
        log::warn!("未配置 API Key，接口不启用认证");
    }
    log::info!("启动红利看板后端服务: http://{}", config.bind_addr());

    let bind_addr = config.bind_addr();
    let workers = config.server.workers;
    let api_key = config.api.api_key.clone();
    let app_config = web::Data::new(config);

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(app_config.clone())
            .wrap(Logger::default()) // 添加请求日志中间件
            .wrap(ApiKeyMiddleware::new(api_key.clone())) // Bearer Token 认证
            .route("/", web::get().to(dashboard::page)) // 看板页面
            .configure(handlers::config) // 配置 API 路由
    })
    .bind(bind_addr)?;

    if workers > 0 {
        server = server.workers(workers);
    }
    server.run().await
}
