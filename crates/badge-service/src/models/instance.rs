//! 徽章实例实体定义
//!
//! 实例是一次具体的授予。所有 `override_*` 字段为空时继承模板默认值。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{
    AwardStatus, BadgeTier, EntityType, LegacyBackgroundType, LegacyForegroundType, OuterShape,
};
use crate::visual::VisualConfig;

/// 徽章实例
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BadgeInstance {
    pub id: i64,
    pub template_id: i64,
    pub giver_type: EntityType,
    pub giver_id: String,
    pub receiver_type: EntityType,
    pub receiver_id: String,

    pub award_status: AwardStatus,
    /// 对外 API 是否可见，加入展示柜前始终为 false
    pub api_visible: bool,
    pub assigned_at: DateTime<Utc>,
    /// 软删除时间戳，非空即视为已撤销
    #[sqlx(default)]
    pub revoked_at: Option<DateTime<Utc>>,

    // 内容覆盖
    #[sqlx(default)]
    pub override_badge_name: Option<String>,
    #[sqlx(default)]
    pub override_subtitle: Option<String>,
    #[sqlx(default)]
    pub override_display_description: Option<String>,
    #[sqlx(default)]
    pub override_outer_shape: Option<OuterShape>,

    // 外观配置覆盖（JSON）
    #[sqlx(default)]
    pub override_border_config: Option<Value>,
    #[sqlx(default)]
    pub override_background_config: Option<Value>,
    #[sqlx(default)]
    pub override_foreground_config: Option<Value>,

    // 旧版标量覆盖
    #[sqlx(default)]
    pub override_border_color: Option<String>,
    #[sqlx(default)]
    pub override_background_type: Option<LegacyBackgroundType>,
    #[sqlx(default)]
    pub override_background_value: Option<String>,
    #[sqlx(default)]
    pub override_foreground_type: Option<LegacyForegroundType>,
    #[sqlx(default)]
    pub override_foreground_value: Option<String>,
    #[sqlx(default)]
    pub override_foreground_color: Option<String>,

    /// 度量值，仅在模板 defines_measure 时有意义
    #[sqlx(default)]
    pub measure_value: Option<f64>,
    #[sqlx(default)]
    pub override_measure_best: Option<f64>,
    #[sqlx(default)]
    pub override_measure_worst: Option<f64>,
    #[sqlx(default)]
    pub override_measure_best_label: Option<String>,
    #[sqlx(default)]
    pub override_measure_worst_label: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BadgeInstance {
    /// 解析边框配置覆盖
    pub fn border_config(&self) -> Option<VisualConfig> {
        self.override_border_config
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 解析背景配置覆盖
    pub fn background_config(&self) -> Option<VisualConfig> {
        self.override_background_config
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 解析前景配置覆盖
    pub fn foreground_config(&self) -> Option<VisualConfig> {
        self.override_foreground_config
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 是否已撤销
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// 是否可加入展示柜
    ///
    /// 只有已接受且未撤销的实例可以被陈列
    pub fn is_displayable(&self) -> bool {
        self.award_status == AwardStatus::Accepted && !self.is_revoked()
    }
}

/// 实例元数据键值
///
/// 键对应模板的 MetadataFieldDefinition.field_key
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MetadataValue {
    pub id: i64,
    pub instance_id: i64,
    pub data_key: String,
    pub data_value: String,
}

/// 用户等级配额
///
/// 每个 (user_id, tier) 一行，授予等级徽章时在事务内原子扣减
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgeAllocation {
    pub id: i64,
    pub user_id: String,
    pub tier: BadgeTier,
    pub remaining: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
