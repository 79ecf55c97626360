//! 基础设施错误类型
//!
//! 共享库自身的错误定义，业务错误由各服务各自定义。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("日志初始化失败: {0}")]
    LoggingInit(String),
}

/// 共享库 Result 类型别名
pub type Result<T> = std::result::Result<T, SharedError>;
