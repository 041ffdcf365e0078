//! 自选股红利数据更新脚本
//!
//! 读取自选股列表，逐支抓取雪球行情（含股息率），
//! 重写 data/dividend_data.csv 供看板读取。手动运行，单轮无重试

use env_logger::Env;

use dividend_backend::config::AppConfig;
use dividend_backend::services::DividendService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    let mut service = DividendService::from_config(&config.api)?;
    service.refresh_watchlist(&config.data).await?;
    Ok(())
}
