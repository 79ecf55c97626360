//! 旧版格式桥接
//!
//! 配置对象格式引入前，模板和实例用标量字段描述外观
//! （border_color、background_type/value、foreground_type/value/color）。
//! 这里提供旧格式到配置对象的单向合成，使旧数据无需迁移即可渲染。

use super::config::VisualConfig;
use crate::models::{LegacyBackgroundType, LegacyForegroundType};

/// 合并旧版颜色字段与配置对象
///
/// 显式配置优先；仅有旧标量时合成纯色配置；两者皆无返回 None
pub fn merge_legacy_color(
    legacy_color: Option<&str>,
    config: Option<VisualConfig>,
) -> Option<VisualConfig> {
    if config.is_some() {
        return config;
    }
    legacy_color
        .filter(|c| !c.is_empty())
        .map(VisualConfig::simple_color)
}

/// 旧版背景字段转配置对象
///
/// SOLID_COLOR -> simple-color，HOSTED_IMAGE -> hosted-asset
pub fn convert_legacy_background(
    background_type: Option<LegacyBackgroundType>,
    value: Option<&str>,
) -> Option<VisualConfig> {
    let value = value.filter(|v| !v.is_empty())?;
    match background_type? {
        LegacyBackgroundType::SolidColor => Some(VisualConfig::simple_color(value)),
        LegacyBackgroundType::HostedImage => Some(VisualConfig::hosted_asset(value)),
    }
}

/// 旧版前景字段转配置对象
///
/// SYSTEM_ICON -> system-icon，UPLOADED_ICON -> hosted-asset。
/// TEXT 前景没有配置表示，文本内容仍由旧标量字段承载，
/// 颜色提取通过 fallback 参数走旧 foreground_color。
pub fn convert_legacy_foreground(
    foreground_type: Option<LegacyForegroundType>,
    value: Option<&str>,
    color: Option<&str>,
) -> Option<VisualConfig> {
    let value = value.filter(|v| !v.is_empty())?;
    match foreground_type? {
        LegacyForegroundType::SystemIcon => {
            let mut config = serde_json::json!({
                "type": "system-icon",
                "version": super::config::CONFIG_VERSION,
                "value": value,
            });
            if let Some(color) = color.filter(|c| !c.is_empty()) {
                config["color"] = serde_json::Value::String(color.to_string());
            }
            serde_json::from_value(config).ok()
        }
        LegacyForegroundType::UploadedIcon => Some(VisualConfig::hosted_asset(value)),
        LegacyForegroundType::Text => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_explicit_config() {
        let config = VisualConfig::simple_color("#111111");
        let merged = merge_legacy_color(Some("#999999"), Some(config.clone()));
        assert_eq!(merged, Some(config));
    }

    #[test]
    fn test_merge_synthesizes_from_legacy() {
        let merged = merge_legacy_color(Some("#4A90D9"), None);
        assert_eq!(merged, Some(VisualConfig::simple_color("#4A90D9")));
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert_eq!(merge_legacy_color(None, None), None);
        assert_eq!(merge_legacy_color(Some(""), None), None);
    }

    #[test]
    fn test_convert_legacy_background() {
        assert_eq!(
            convert_legacy_background(Some(LegacyBackgroundType::SolidColor), Some("#2E7D32")),
            Some(VisualConfig::simple_color("#2E7D32"))
        );
        assert_eq!(
            convert_legacy_background(
                Some(LegacyBackgroundType::HostedImage),
                Some("https://cdn.viaguild.com/bg.png")
            ),
            Some(VisualConfig::hosted_asset("https://cdn.viaguild.com/bg.png"))
        );
        assert_eq!(convert_legacy_background(None, Some("#fff")), None);
        assert_eq!(
            convert_legacy_background(Some(LegacyBackgroundType::SolidColor), None),
            None
        );
    }

    #[test]
    fn test_convert_legacy_foreground_system_icon() {
        let config = convert_legacy_foreground(
            Some(LegacyForegroundType::SystemIcon),
            Some("trophy"),
            Some("#FFD700"),
        );
        match config {
            Some(VisualConfig::SystemIcon(i)) => {
                assert_eq!(i.value, "trophy");
                assert_eq!(i.color.as_deref(), Some("#FFD700"));
            }
            other => panic!("期望 SystemIcon，实际: {:?}", other),
        }
    }

    #[test]
    fn test_convert_legacy_foreground_text_has_no_config() {
        let config =
            convert_legacy_foreground(Some(LegacyForegroundType::Text), Some("GG"), Some("#000"));
        assert_eq!(config, None);
    }

    #[test]
    fn test_convert_legacy_foreground_uploaded_icon() {
        let config = convert_legacy_foreground(
            Some(LegacyForegroundType::UploadedIcon),
            Some("https://cdn.viaguild.com/icon.svg"),
            None,
        );
        assert_eq!(
            config,
            Some(VisualConfig::hosted_asset("https://cdn.viaguild.com/icon.svg"))
        );
    }
}
