//! 徽章服务错误类型
//!
//! 定义服务层的业务错误和系统错误。所有变体携带稳定的错误码，
//! HTTP 层按变体映射状态码，不做消息文本匹配。

use thiserror::Error;

use crate::models::BadgeTier;

/// 徽章服务错误类型
#[derive(Debug, Error)]
pub enum BadgeError {
    // === 模板相关错误 ===
    #[error("徽章模板不存在: {0}")]
    TemplateNotFound(i64),

    #[error("模板 slug 已被占用: {0}")]
    TemplateSlugConflict(String),

    #[error("模板 slug 后缀尝试次数耗尽: {0}")]
    TemplateSlugExhausted(String),

    #[error("模板仍有 {live_instances} 个有效实例，无法删除: template_id={template_id}")]
    TemplateInUse {
        template_id: i64,
        live_instances: i64,
    },

    #[error("无权操作此模板: template_id={0}")]
    NotTemplateOwner(i64),

    // === 实例相关错误 ===
    #[error("徽章实例不存在: {0}")]
    InstanceNotFound(i64),

    #[error("徽章实例已撤销: {0}")]
    AlreadyRevoked(i64),

    #[error("只有徽章接收者可以执行此操作: instance_id={0}")]
    NotBadgeReceiver(i64),

    // === 用户与展示柜错误 ===
    #[error("用户不存在: {0}")]
    UserNotFound(String),

    #[error("展示柜不存在: {0}")]
    CaseNotFound(String),

    #[error("无权操作此展示柜: {0}")]
    NotCaseOwner(String),

    #[error("展示柜未公开: {0}")]
    PrivateCase(String),

    #[error("徽章已在展示柜中: instance_id={0}")]
    AlreadyInCase(i64),

    #[error("徽章不在展示柜中: instance_id={0}")]
    NotInCase(i64),

    // === 配额错误 ===
    #[error("等级配额不足: tier={tier:?}")]
    InsufficientAllocation { tier: BadgeTier },

    // === 系统错误 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("资源存储服务错误: {0}")]
    AssetStore(String),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 徽章服务 Result 类型别名
pub type Result<T> = std::result::Result<T, BadgeError>;

impl BadgeError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            Self::Database(_) | Self::Serialization(_) | Self::AssetStore(_) | Self::Internal(_)
        )
    }

    /// 获取错误码（用于 API 响应，是对外契约的一部分）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            Self::TemplateSlugConflict(_) => "TEMPLATE_SLUG_CONFLICT",
            Self::TemplateSlugExhausted(_) => "TEMPLATE_SLUG_EXHAUSTED",
            Self::TemplateInUse { .. } => "TEMPLATE_IN_USE",
            Self::NotTemplateOwner(_) => "NOT_TEMPLATE_OWNER",
            Self::InstanceNotFound(_) => "INSTANCE_NOT_FOUND",
            Self::AlreadyRevoked(_) => "ALREADY_REVOKED",
            Self::NotBadgeReceiver(_) => "NOT_BADGE_RECEIVER",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::CaseNotFound(_) => "CASE_NOT_FOUND",
            Self::NotCaseOwner(_) => "NOT_CASE_OWNER",
            Self::PrivateCase(_) => "PRIVATE_CASE",
            Self::AlreadyInCase(_) => "ALREADY_IN_CASE",
            Self::NotInCase(_) => "NOT_IN_CASE",
            Self::InsufficientAllocation { .. } => "INSUFFICIENT_ALLOCATION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::AssetStore(_) => "ASSET_STORE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
