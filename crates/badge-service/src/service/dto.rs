//! 服务层请求/响应 DTO 定义

use serde::{Deserialize, Serialize};

use crate::models::{
    AwardStatus, BadgeInstance, BadgeTemplate, BadgeTier, EntityType, LegacyBackgroundType,
    LegacyForegroundType, MetadataFieldDefinition, MetadataValue, OuterShape,
};
use crate::repository::NewMetadataField;
use crate::visual::VisualConfig;

/// 创建模板入参
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateInput {
    pub template_slug: String,
    /// 缺省为 USER
    #[serde(default)]
    pub owner_type: EntityType,
    /// 缺省为操作者本人
    #[serde(default)]
    pub owner_id: Option<String>,

    pub default_badge_name: String,
    #[serde(default)]
    pub default_subtitle_text: Option<String>,
    #[serde(default)]
    pub default_display_description: Option<String>,
    #[serde(default)]
    pub default_outer_shape: Option<OuterShape>,

    #[serde(default)]
    pub default_border_config: Option<VisualConfig>,
    #[serde(default)]
    pub default_background_config: Option<VisualConfig>,
    #[serde(default)]
    pub default_foreground_config: Option<VisualConfig>,

    #[serde(default)]
    pub default_border_color: Option<String>,
    #[serde(default)]
    pub default_background_type: Option<LegacyBackgroundType>,
    #[serde(default)]
    pub default_background_value: Option<String>,
    #[serde(default)]
    pub default_foreground_type: Option<LegacyForegroundType>,
    #[serde(default)]
    pub default_foreground_value: Option<String>,
    #[serde(default)]
    pub default_foreground_color: Option<String>,

    #[serde(default)]
    pub inherent_tier: Option<BadgeTier>,

    #[serde(default)]
    pub defines_measure: bool,
    #[serde(default)]
    pub measure_label: Option<String>,
    #[serde(default)]
    pub measure_best: Option<f64>,
    #[serde(default)]
    pub measure_worst: Option<f64>,
    #[serde(default)]
    pub measure_is_normalizable: bool,
    #[serde(default)]
    pub higher_is_better: Option<bool>,
    #[serde(default)]
    pub measure_best_label: Option<String>,
    #[serde(default)]
    pub measure_worst_label: Option<String>,

    /// 客户端可以尝试设置，但写入时恒被置为 false
    #[serde(default)]
    pub is_modifiable_by_issuer: Option<bool>,
    #[serde(default)]
    pub allows_pushed_instance_updates: bool,

    /// 实例级元数据槽定义
    #[serde(default)]
    pub metadata_field_definitions: Vec<MetadataFieldInput>,

    /// 客户端已做过颜色重映射的 SVG 内容，提供时直接存储，
    /// 不再搬运原始上传
    #[serde(default)]
    pub transformed_foreground_svg: Option<String>,
}

/// 元数据字段定义入参
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFieldInput {
    pub field_key: String,
    pub label: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl From<MetadataFieldInput> for NewMetadataField {
    fn from(input: MetadataFieldInput) -> Self {
        Self {
            field_key: input.field_key,
            label: input.label,
            prefix: input.prefix,
            suffix: input.suffix,
            display_order: input.display_order,
        }
    }
}

/// 更新模板入参
///
/// 所有字段可选，缺省表示保持原值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateInput {
    #[serde(default)]
    pub template_slug: Option<String>,
    #[serde(default)]
    pub default_badge_name: Option<String>,
    #[serde(default)]
    pub default_subtitle_text: Option<String>,
    #[serde(default)]
    pub default_display_description: Option<String>,
    #[serde(default)]
    pub default_outer_shape: Option<OuterShape>,
    #[serde(default)]
    pub default_border_config: Option<VisualConfig>,
    #[serde(default)]
    pub default_background_config: Option<VisualConfig>,
    #[serde(default)]
    pub default_foreground_config: Option<VisualConfig>,
    #[serde(default)]
    pub default_border_color: Option<String>,
    #[serde(default)]
    pub default_background_type: Option<LegacyBackgroundType>,
    #[serde(default)]
    pub default_background_value: Option<String>,
    #[serde(default)]
    pub default_foreground_type: Option<LegacyForegroundType>,
    #[serde(default)]
    pub default_foreground_value: Option<String>,
    #[serde(default)]
    pub default_foreground_color: Option<String>,
    #[serde(default)]
    pub measure_label: Option<String>,
    #[serde(default)]
    pub measure_best: Option<f64>,
    #[serde(default)]
    pub measure_worst: Option<f64>,
    #[serde(default)]
    pub higher_is_better: Option<bool>,
    #[serde(default)]
    pub measure_best_label: Option<String>,
    #[serde(default)]
    pub measure_worst_label: Option<String>,
    /// 任何写入尝试都会被静默剥离
    #[serde(default)]
    pub is_modifiable_by_issuer: Option<bool>,
    #[serde(default)]
    pub allows_pushed_instance_updates: Option<bool>,
    #[serde(default)]
    pub metadata_field_definitions: Option<Vec<MetadataFieldInput>>,
}

/// 带字段定义的模板视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateWithFields {
    #[serde(flatten)]
    pub template: BadgeTemplate,
    pub metadata_field_definitions: Vec<MetadataFieldDefinition>,
}

/// 实例级定制（授予时的逐字段覆盖）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCustomizations {
    #[serde(default)]
    pub override_badge_name: Option<String>,
    #[serde(default)]
    pub override_subtitle: Option<String>,
    #[serde(default)]
    pub override_display_description: Option<String>,
    #[serde(default)]
    pub override_outer_shape: Option<OuterShape>,
    #[serde(default)]
    pub override_border_config: Option<VisualConfig>,
    #[serde(default)]
    pub override_background_config: Option<VisualConfig>,
    #[serde(default)]
    pub override_foreground_config: Option<VisualConfig>,
    #[serde(default)]
    pub override_border_color: Option<String>,
    #[serde(default)]
    pub override_background_type: Option<LegacyBackgroundType>,
    #[serde(default)]
    pub override_background_value: Option<String>,
    #[serde(default)]
    pub override_foreground_type: Option<LegacyForegroundType>,
    #[serde(default)]
    pub override_foreground_value: Option<String>,
    #[serde(default)]
    pub override_foreground_color: Option<String>,
    #[serde(default)]
    pub measure_value: Option<f64>,
    #[serde(default)]
    pub override_measure_best: Option<f64>,
    #[serde(default)]
    pub override_measure_worst: Option<f64>,
    #[serde(default)]
    pub override_measure_best_label: Option<String>,
    #[serde(default)]
    pub override_measure_worst_label: Option<String>,
    /// 键需匹配模板的字段定义
    #[serde(default)]
    pub metadata_values: Vec<MetadataValueInput>,
}

/// 元数据键值入参
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataValueInput {
    pub data_key: String,
    pub data_value: String,
}

/// 授予结果：实例连同模板与元数据一并返回
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardedBadge {
    pub instance: BadgeInstance,
    pub template: BadgeTemplate,
    pub metadata: Vec<MetadataValue>,
}

/// 批量授予的单个成功项
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAwardSuccess {
    pub username: String,
    pub instance_id: i64,
}

/// 批量授予的单个失败项
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAwardFailure {
    pub username: String,
    pub error_code: String,
    pub error: String,
}

/// 批量授予结果
///
/// 各接收者相互独立，部分失败是预期行为
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAwardResult {
    pub successful: Vec<BulkAwardSuccess>,
    pub failed: Vec<BulkAwardFailure>,
}

impl BulkAwardResult {
    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len()
    }
}

/// 授予记录查询入参
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivenBadgesQuery {
    #[serde(default)]
    pub status: Option<AwardStatus>,
    #[serde(default)]
    pub template_id: Option<i64>,
    #[serde(default)]
    pub receiver_username: Option<String>,
}

/// 授予记录视图：实例附带接收者展示信息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GivenBadgeView {
    pub instance: BadgeInstance,
    /// 仅 USER 类型接收者附带
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ReceiverInfo>,
}

/// 接收者展示信息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverInfo {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// 展示柜条目重排序入参
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    pub instance_id: i64,
    pub display_order: i32,
}

/// 供外部断言用的所有权辅助
impl CreateTemplateInput {
    /// 模板归属：显式 owner_id 优先，否则归操作者
    pub fn resolved_owner(&self, actor_id: &str) -> (EntityType, String) {
        match &self.owner_id {
            Some(owner_id) => (self.owner_type, owner_id.clone()),
            None => (EntityType::User, actor_id.to_string()),
        }
    }
}
