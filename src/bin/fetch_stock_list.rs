//! 全量 A 股代码列表抓取脚本
//!
//! 从东方财富分页拉取全市场股票代码和名称，按 A 股代码规则过滤，
//! 保存为 data/a_stock_codes.csv 供后续筛选使用

use env_logger::Env;

use dividend_backend::config::AppConfig;
use dividend_backend::services::DividendService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    let service = DividendService::from_config(&config.api)?;
    let total = service.refresh_stock_list(&config.data).await?;
    log::info!("A股代码列表同步完成，共 {} 条", total);
    Ok(())
}
