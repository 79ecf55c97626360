//! 徽章模板实体定义
//!
//! 模板是可复用的徽章定义：默认外观、等级/度量语义、元数据字段结构。
//! 实例通过逐字段覆盖继承模板默认值。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{BadgeTier, EntityType, LegacyBackgroundType, LegacyForegroundType, OuterShape};
use crate::visual::VisualConfig;

/// 徽章模板
///
/// 外观配置以 jsonb 存储（`default_*_config`），旧版标量字段
/// （`default_border_color` 等）与配置对象保持同步，供未迁移的
/// 消费端继续使用。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BadgeTemplate {
    pub id: i64,
    /// 所有者命名空间内唯一（大小写不敏感）
    pub template_slug: String,
    pub owner_type: EntityType,
    pub owner_id: String,
    /// 创建模板的用户（公会模板由某个成员代表创建）
    pub authored_by_user_id: String,

    pub default_badge_name: String,
    #[sqlx(default)]
    pub default_subtitle_text: Option<String>,
    #[sqlx(default)]
    pub default_display_description: Option<String>,
    pub default_outer_shape: OuterShape,

    /// 边框配置（JSON，存储 VisualConfig）
    #[sqlx(default)]
    pub default_border_config: Option<Value>,
    /// 背景配置（JSON）
    #[sqlx(default)]
    pub default_background_config: Option<Value>,
    /// 前景配置（JSON）
    #[sqlx(default)]
    pub default_foreground_config: Option<Value>,

    // 旧版标量镜像
    #[sqlx(default)]
    pub default_border_color: Option<String>,
    #[sqlx(default)]
    pub default_background_type: Option<LegacyBackgroundType>,
    #[sqlx(default)]
    pub default_background_value: Option<String>,
    #[sqlx(default)]
    pub default_foreground_type: Option<LegacyForegroundType>,
    #[sqlx(default)]
    pub default_foreground_value: Option<String>,
    #[sqlx(default)]
    pub default_foreground_color: Option<String>,

    /// 等级（GOLD/SILVER/BRONZE），为空表示普通徽章
    #[sqlx(default)]
    pub inherent_tier: Option<BadgeTier>,

    /// 是否定义量化度量轴（如"最快圈速"）
    pub defines_measure: bool,
    #[sqlx(default)]
    pub measure_label: Option<String>,
    #[sqlx(default)]
    pub measure_best: Option<f64>,
    #[sqlx(default)]
    pub measure_worst: Option<f64>,
    pub measure_is_normalizable: bool,
    #[sqlx(default)]
    pub higher_is_better: Option<bool>,
    #[sqlx(default)]
    pub measure_best_label: Option<String>,
    #[sqlx(default)]
    pub measure_worst_label: Option<String>,

    /// 模板修改是否传播到已发放实例（未实现，恒为 false）
    pub is_modifiable_by_issuer: bool,
    pub allows_pushed_instance_updates: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BadgeTemplate {
    /// 解析边框配置
    ///
    /// 无法识别的配置按不存在处理，提取函数会走兜底逻辑
    pub fn border_config(&self) -> Option<VisualConfig> {
        self.default_border_config
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 解析背景配置
    pub fn background_config(&self) -> Option<VisualConfig> {
        self.default_background_config
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 解析前景配置
    pub fn foreground_config(&self) -> Option<VisualConfig> {
        self.default_foreground_config
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 是否为等级徽章
    pub fn is_tiered(&self) -> bool {
        self.inherent_tier.is_some()
    }
}

/// 模板元数据字段定义
///
/// 描述实例级键值数据槽的结构（键名、展示标签、前后缀），
/// 按 display_order 排序展示
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFieldDefinition {
    pub id: i64,
    pub template_id: i64,
    pub field_key: String,
    pub label: String,
    #[sqlx(default)]
    pub prefix: Option<String>,
    #[sqlx(default)]
    pub suffix: Option<String>,
    pub display_order: i32,
}
