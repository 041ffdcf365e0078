//! 业务逻辑服务模块
//!
//! 封装数据获取和落盘流程

pub mod dividend_service; // 红利数据同步服务
pub mod stock;            // 各数据源接口

pub use dividend_service::DividendService;
