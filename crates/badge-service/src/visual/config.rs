//! 外观配置联合类型
//!
//! 以 `type` 字段区分的标签联合，覆盖边框/背景/前景三个配置槽的
//! 全部表示形式。新增变体时编译器会强制所有提取点补全匹配分支。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

use regex::Regex;

/// 当前配置格式版本
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// `#RGB` / `#RRGGBB` / `#RRGGBBAA` 形式的十六进制颜色
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// 外观配置
///
/// `element-path` 是 `customizable-svg` 的历史名称，反序列化时兼容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualConfig {
    /// 纯色
    SimpleColor(SimpleColorConfig),
    /// 托管图片资源
    HostedAsset(HostedAssetConfig),
    /// 多元素 SVG 颜色映射
    #[serde(alias = "element-path")]
    CustomizableSvg(CustomizableSvgConfig),
    /// 系统内置图标
    SystemIcon(SystemIconConfig),
}

/// 纯色配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleColorConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    pub color: String,
}

/// 托管图片配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedAssetConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    pub url: String,
}

/// 可定制 SVG 配置
///
/// `color_mappings` 以元素选择器为键，值为该元素的 fill/stroke 槽位。
/// 键的插入顺序有语义（颜色提取取第一个已定义的槽位），序列化依赖
/// serde_json 的 preserve_order 特性保持顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizableSvgConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default)]
    pub color_mappings: Map<String, Value>,
}

/// 系统图标配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemIconConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    /// 图标名称
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// 单个 SVG 元素的颜色槽位
///
/// 宽松解析：colorMappings 的值可能来自旧客户端，缺字段按空处理
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementColorMapping {
    #[serde(default)]
    pub fill: Option<ColorSlot>,
    #[serde(default)]
    pub stroke: Option<ColorSlot>,
}

/// 颜色槽位：当前值与原始值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSlot {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

impl VisualConfig {
    /// 创建纯色配置
    pub fn simple_color(color: impl Into<String>) -> Self {
        Self::SimpleColor(SimpleColorConfig {
            version: CONFIG_VERSION,
            color: color.into(),
        })
    }

    /// 创建托管图片配置
    pub fn hosted_asset(url: impl Into<String>) -> Self {
        Self::HostedAsset(HostedAssetConfig {
            version: CONFIG_VERSION,
            url: url.into(),
        })
    }

    /// 创建可定制 SVG 配置
    pub fn customizable_svg(
        color_mappings: Map<String, Value>,
        url: Option<String>,
        scale: Option<f64>,
    ) -> Self {
        Self::CustomizableSvg(CustomizableSvgConfig {
            version: CONFIG_VERSION,
            url,
            scale,
            color_mappings,
        })
    }

    /// 形状校验
    ///
    /// 只做防御性检查，写入路径不以此作为硬性门禁：
    /// 格式错误的 JSON 在 DTO 反序列化时已被拒绝
    pub fn validate(&self) -> bool {
        match self {
            Self::SimpleColor(c) => HEX_COLOR.is_match(&c.color),
            Self::HostedAsset(a) => !a.url.is_empty(),
            Self::CustomizableSvg(s) => {
                s.url.as_ref().is_some_and(|u| !u.is_empty()) || !s.color_mappings.is_empty()
            }
            Self::SystemIcon(i) => !i.value.is_empty(),
        }
    }
}

/// 检查字符串是否为合法十六进制颜色
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}
