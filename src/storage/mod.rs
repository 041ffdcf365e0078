//! 持久化模块
//!
//! 看板进程和抓取进程共享的两个文件：
//! - `self_selected_stocks.json`: 自选股列表（有序 JSON 数组）
//! - `data/dividend_data.csv`: 红利数据表（中文表头，UTF-8 BOM）
//!
//! 没有锁，也没有增量更新：每条路径都整文件读入、内存变换、整文件写回，
//! 并在读写两侧各自规范化去重，保证两个进程对文件形态的理解一致。

pub mod dividend_store;
pub mod watchlist_store;
