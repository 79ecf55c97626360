//! 系统图标
//!
//! 内置图标集合：前景配置为 `system-icon` 时按名称解析 SVG 标记。
//! 未知名称回退到默认圆形图标，保证前景永远可渲染。

/// 未知图标的兜底圆形
const DEFAULT_GLYPH: &str =
    r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><circle cx="12" cy="12" r="9" fill="currentColor"/></svg>"#;

/// 内置图标表
///
/// 图标统一使用 currentColor，颜色由配置的 color 字段控制
const ICONS: &[(&str, &str)] = &[
    (
        "trophy",
        r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" d="M5 3h14v2h3v4a5 5 0 0 1-5 5h-.35A7 7 0 0 1 13 17.92V20h4v2H7v-2h4v-2.08A7 7 0 0 1 7.35 14H7a5 5 0 0 1-5-5V5h3V3zm0 4H4v2a3 3 0 0 0 3 3V7zm14 0v5a3 3 0 0 0 3-3V7h-3z"/></svg>"#,
    ),
    (
        "star",
        r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" d="M12 2l2.9 6.3 6.9.8-5.1 4.7 1.4 6.8L12 17.2l-6.1 3.4 1.4-6.8L2.2 9.1l6.9-.8z"/></svg>"#,
    ),
    (
        "shield",
        r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" d="M12 2l8 3v6c0 5.2-3.4 9.4-8 11-4.6-1.6-8-5.8-8-11V5z"/></svg>"#,
    ),
    (
        "flame",
        r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" d="M12 2s5 4.5 5 9a5 5 0 0 1-10 0c0-1.5.5-3 1.4-4.3C9 8.4 10.5 9.5 12 9.5 12 6.5 12 2 12 2z"/></svg>"#,
    ),
    (
        "crown",
        r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" d="M3 7l4 4 5-6 5 6 4-4v10H3z"/></svg>"#,
    ),
    (
        "heart",
        r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" d="M12 21l-1.5-1.4C5.2 14.9 2 12 2 8.4 2 5.4 4.4 3 7.4 3c1.7 0 3.3.8 4.6 2.1C13.3 3.8 14.9 3 16.6 3 19.6 3 22 5.4 22 8.4c0 3.6-3.2 6.5-8.5 11.2z"/></svg>"#,
    ),
    (
        "bolt",
        r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" d="M13 2L4 14h6l-1 8 9-12h-6z"/></svg>"#,
    ),
];

/// 按名称解析系统图标的 SVG 标记
///
/// 未知名称返回默认圆形图标，永不失败
pub fn resolve_icon(name: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(icon_name, _)| *icon_name == name)
        .map(|(_, svg)| *svg)
        .unwrap_or(DEFAULT_GLYPH)
}

/// 图标名称是否为内置图标
pub fn is_known_icon(name: &str) -> bool {
    ICONS.iter().any(|(icon_name, _)| *icon_name == name)
}
