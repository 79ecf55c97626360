//! 展示属性解析
//!
//! 把模板默认值与实例覆盖合并为权威的展示属性。解析是纯函数，
//! 不访问数据库；数据装配由查询服务完成。
//!
//! ## 解析顺序
//!
//! 1. 内容字段：覆盖优先，否则取模板默认
//! 2. 三个配置槽：实例覆盖 -> 模板默认 -> 旧版标量合成
//! 3. 从解析后的配置提取标量颜色与样式对象
//! 4. 等级规则（最后一步，不可跳过）：等级模板的边框颜色
//!    无条件替换为固定等级色
//! 5. 度量与元数据字段装配

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    AwardStatus, BadgeInstance, BadgeTemplate, BadgeTier, EntityType, MetadataFieldDefinition,
    MetadataValue, OuterShape,
};
use crate::visual::{
    DEFAULT_BORDER_COLOR, DEFAULT_BORDER_WIDTH, DEFAULT_FOREGROUND_COLOR, StyleProps, VisualConfig,
    convert_legacy_background, convert_legacy_foreground, extract_background_style,
    extract_border_style, extract_color, merge_legacy_color,
};

/// 解析后的度量信息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMeasure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst: Option<f64>,
    pub is_normalizable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub higher_is_better: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_label: Option<String>,
}

/// 解析后的元数据条目
///
/// 无对应值的字段定义不出现在结果中
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDisplayItem {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub value: String,
}

/// 权威展示属性
///
/// 同时携带原始配置对象和提取后的标量/样式，消费端可任选其一
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDisplayProps {
    pub instance_id: i64,
    pub template_id: i64,
    pub template_slug: String,

    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub shape: OuterShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<BadgeTier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_config: Option<VisualConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_config: Option<VisualConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_config: Option<VisualConfig>,

    /// 旧格式兼容的标量输出，等级规则应用后的最终值
    pub border_color: String,
    pub foreground_color: String,
    pub border_style: StyleProps,
    pub background_style: StyleProps,
    /// 前景为系统图标时解析出的 SVG 标记（未知名称回退默认图形）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_svg: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<ResolvedMeasure>,
    pub metadata: Vec<MetadataDisplayItem>,

    pub giver_type: EntityType,
    pub giver_id: String,
    pub award_status: AwardStatus,
    pub api_visible: bool,
    pub assigned_at: DateTime<Utc>,
}

/// 解析实例的展示属性
///
/// `field_defs` 须已按 display_order 排序，`values` 为该实例的
/// 全部元数据键值
pub fn resolve_display_props(
    template: &BadgeTemplate,
    instance: &BadgeInstance,
    field_defs: &[MetadataFieldDefinition],
    values: &[MetadataValue],
) -> BadgeDisplayProps {
    // 1. 内容字段
    let name = instance
        .override_badge_name
        .clone()
        .unwrap_or_else(|| template.default_badge_name.clone());
    let subtitle = instance
        .override_subtitle
        .clone()
        .or_else(|| template.default_subtitle_text.clone());
    let description = instance
        .override_display_description
        .clone()
        .or_else(|| template.default_display_description.clone());
    let shape = instance
        .override_outer_shape
        .unwrap_or(template.default_outer_shape);

    // 2. 配置槽：覆盖 -> 模板默认 -> 旧版合成（实例优先）
    let border_config = instance
        .border_config()
        .or_else(|| template.border_config())
        .or_else(|| merge_legacy_color(instance.override_border_color.as_deref(), None))
        .or_else(|| merge_legacy_color(template.default_border_color.as_deref(), None));

    let background_config = instance
        .background_config()
        .or_else(|| template.background_config())
        .or_else(|| {
            convert_legacy_background(
                instance.override_background_type,
                instance.override_background_value.as_deref(),
            )
        })
        .or_else(|| {
            convert_legacy_background(
                template.default_background_type,
                template.default_background_value.as_deref(),
            )
        });

    let foreground_config = instance
        .foreground_config()
        .or_else(|| template.foreground_config())
        .or_else(|| {
            convert_legacy_foreground(
                instance.override_foreground_type,
                instance.override_foreground_value.as_deref(),
                instance.override_foreground_color.as_deref(),
            )
        })
        .or_else(|| {
            convert_legacy_foreground(
                template.default_foreground_type,
                template.default_foreground_value.as_deref(),
                template.default_foreground_color.as_deref(),
            )
        });

    // 3. 标量与样式提取
    let mut border_color = extract_color(border_config.as_ref(), DEFAULT_BORDER_COLOR);
    let mut border_style = extract_border_style(border_config.as_ref(), DEFAULT_BORDER_WIDTH);

    // 前景色的兜底取旧版标量（TEXT 前景无配置表示，颜色仍在旧字段里）
    let foreground_fallback = instance
        .override_foreground_color
        .as_deref()
        .or(template.default_foreground_color.as_deref())
        .unwrap_or(DEFAULT_FOREGROUND_COLOR);
    let foreground_color = extract_color(foreground_config.as_ref(), foreground_fallback);

    let background_style = extract_background_style(background_config.as_ref());

    // 系统图标前景解析为 SVG 标记，未知名称有固定兜底图形
    let foreground_svg = match &foreground_config {
        Some(VisualConfig::SystemIcon(icon)) => {
            Some(crate::assets::resolve_icon(&icon.value).to_string())
        }
        Some(VisualConfig::SimpleColor(_))
        | Some(VisualConfig::HostedAsset(_))
        | Some(VisualConfig::CustomizableSvg(_))
        | None => None,
    };

    // 4. 等级规则：任何定制都不能伪造等级边框色。
    //    作为独立的最后一步应用，不并入配置合并。
    if let Some(tier) = template.inherent_tier {
        border_color = tier.border_color().to_string();
        border_style = StyleProps {
            border: Some(format!(
                "{}px solid {}",
                DEFAULT_BORDER_WIDTH,
                tier.border_color()
            )),
            ..Default::default()
        };
    }

    // 5. 度量
    let measure = template.defines_measure.then(|| ResolvedMeasure {
        value: instance.measure_value,
        label: template.measure_label.clone(),
        best: instance.override_measure_best.or(template.measure_best),
        worst: instance.override_measure_worst.or(template.measure_worst),
        is_normalizable: template.measure_is_normalizable,
        higher_is_better: template.higher_is_better,
        best_label: instance
            .override_measure_best_label
            .clone()
            .or_else(|| template.measure_best_label.clone()),
        worst_label: instance
            .override_measure_worst_label
            .clone()
            .or_else(|| template.measure_worst_label.clone()),
    });

    // 6. 元数据：按字段定义顺序关联值，缺值的定义不输出
    let metadata = field_defs
        .iter()
        .filter_map(|def| {
            values
                .iter()
                .find(|v| v.data_key == def.field_key)
                .map(|v| MetadataDisplayItem {
                    key: def.field_key.clone(),
                    label: def.label.clone(),
                    prefix: def.prefix.clone(),
                    suffix: def.suffix.clone(),
                    value: v.data_value.clone(),
                })
        })
        .collect();

    BadgeDisplayProps {
        instance_id: instance.id,
        template_id: template.id,
        template_slug: template.template_slug.clone(),
        name,
        subtitle,
        description,
        shape,
        tier: template.inherent_tier,
        border_config,
        background_config,
        foreground_config,
        border_color,
        foreground_color,
        border_style,
        background_style,
        foreground_svg,
        measure,
        metadata,
        giver_type: instance.giver_type,
        giver_id: instance.giver_id.clone(),
        award_status: instance.award_status,
        api_visible: instance.api_visible,
        assigned_at: instance.assigned_at,
    }
}
