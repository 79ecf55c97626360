//! 共享库
//!
//! 包含各服务共用的配置加载、数据库连接池和日志初始化代码。

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
