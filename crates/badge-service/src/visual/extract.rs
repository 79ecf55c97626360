//! 渲染属性提取
//!
//! 从外观配置提取可渲染的标量颜色或样式对象。所有函数都是纯函数
//! 且全函数：任何输入（包括 None 和无法识别的配置）都返回可用值，
//! 绝不 panic。

use serde::{Deserialize, Serialize};

use super::config::{ElementColorMapping, VisualConfig};

/// 默认边框宽度（像素）
pub const DEFAULT_BORDER_WIDTH: u32 = 6;

/// 默认边框颜色
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

/// 默认前景颜色
pub const DEFAULT_FOREGROUND_COLOR: &str = "#FFFFFF";

/// 渲染样式属性
///
/// 与前端样式对象字段一一对应，空字段不序列化
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_repeat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

impl StyleProps {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// 提取配置的代表颜色
///
/// - `simple-color` / `system-icon`：直接取 color
/// - `customizable-svg`：按插入顺序扫描 colorMappings，返回第一个
///   已定义的 fill.current 或 stroke.current
/// - 其余情况（包括 None、hosted-asset、空映射）返回 fallback
pub fn extract_color(config: Option<&VisualConfig>, fallback: &str) -> String {
    // 穷尽匹配：新增配置变体时此处必须显式决定提取行为
    match config {
        None => fallback.to_string(),
        Some(VisualConfig::SimpleColor(c)) => {
            if c.color.is_empty() {
                fallback.to_string()
            } else {
                c.color.clone()
            }
        }
        Some(VisualConfig::HostedAsset(_)) => fallback.to_string(),
        Some(VisualConfig::CustomizableSvg(svg)) => svg
            .color_mappings
            .values()
            .filter_map(|v| serde_json::from_value::<ElementColorMapping>(v.clone()).ok())
            .find_map(|m| {
                m.fill
                    .and_then(|s| s.current)
                    .or_else(|| m.stroke.and_then(|s| s.current))
            })
            .unwrap_or_else(|| fallback.to_string()),
        Some(VisualConfig::SystemIcon(i)) => i
            .color
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    }
}

/// 提取背景样式
///
/// 无法识别的配置返回空样式对象，由调用方决定兜底展示
pub fn extract_background_style(config: Option<&VisualConfig>) -> StyleProps {
    match config {
        None => StyleProps::default(),
        Some(VisualConfig::SimpleColor(c)) => StyleProps {
            background_color: Some(c.color.clone()),
            ..Default::default()
        },
        Some(VisualConfig::HostedAsset(a)) => StyleProps {
            background_image: Some(format!("url({})", a.url)),
            background_size: Some("cover".to_string()),
            background_position: Some("center".to_string()),
            background_repeat: Some("no-repeat".to_string()),
            ..Default::default()
        },
        // SVG 与系统图标不是合法的背景表示
        Some(VisualConfig::CustomizableSvg(_)) | Some(VisualConfig::SystemIcon(_)) => {
            StyleProps::default()
        }
    }
}

/// 提取边框样式
///
/// 边框永不缺省：无配置时使用默认黑色边框
pub fn extract_border_style(config: Option<&VisualConfig>, width: u32) -> StyleProps {
    let color = match config {
        Some(VisualConfig::SimpleColor(c)) if !c.color.is_empty() => c.color.as_str(),
        // 其余表示（含 None）一律退到默认边框色，边框永不缺省
        Some(
            VisualConfig::SimpleColor(_)
            | VisualConfig::HostedAsset(_)
            | VisualConfig::CustomizableSvg(_)
            | VisualConfig::SystemIcon(_),
        )
        | None => DEFAULT_BORDER_COLOR,
    };

    StyleProps {
        border: Some(format!("{}px solid {}", width, color)),
        ..Default::default()
    }
}
