//! API 处理器

pub mod award;
pub mod badge;
pub mod badge_case;
pub mod template;
