//! 全市场股息率抓取脚本
//!
//! 遍历申万三级行业的成份股，把所有有股息的 A 股追加写入
//! data/dividend_data_shenwan.csv。支持断点续抓，重复运行只补新增标的

use env_logger::Env;

use dividend_backend::config::AppConfig;
use dividend_backend::services::DividendService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    let service = DividendService::from_config(&config.api)?;
    service.refresh_full_market(&config.data).await?;
    Ok(())
}
