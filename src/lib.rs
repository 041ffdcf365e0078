//! A股红利价值看板后端
//!
//! 看板服务和离线抓取脚本共用的库：
//! - `models`: 数据模型与自选股规范化逻辑
//! - `storage`: 自选股 JSON 与红利 CSV 持久化
//! - `services`: 雪球、乐咕乐股、东方财富数据抓取
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: Bearer Token 认证
//!
//! 看板进程和抓取进程是两个独立的可执行文件，
//! 通过 `self_selected_stocks.json` 和 `data/dividend_data.csv` 共享状态。

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
