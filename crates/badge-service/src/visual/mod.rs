//! 外观配置模型
//!
//! 以标签联合表示边框/背景/前景的多态外观配置，并提供纯函数式的
//! 渲染属性提取。调用方只依赖提取结果，不感知具体表示形式。

mod config;
mod extract;
mod legacy;

pub use config::{
    CONFIG_VERSION, ColorSlot, CustomizableSvgConfig, ElementColorMapping, HostedAssetConfig,
    SimpleColorConfig, SystemIconConfig, VisualConfig, is_hex_color,
};
pub use extract::{
    DEFAULT_BORDER_COLOR, DEFAULT_BORDER_WIDTH, DEFAULT_FOREGROUND_COLOR, StyleProps,
    extract_background_style, extract_border_style, extract_color,
};
pub use legacy::{convert_legacy_background, convert_legacy_foreground, merge_legacy_color};
