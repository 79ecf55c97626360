//! 徽章服务枚举类型定义
//!
//! 所有枚举都支持数据库（sqlx）和 JSON（serde）序列化

use serde::{Deserialize, Serialize};

/// 实体类型
///
/// 模板所有者、授予者和接收者都可以是用户或公会
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    #[default]
    User,
    Guild,
}

/// 徽章等级
///
/// 等级徽章受配额稀缺性约束，且边框颜色固定不可定制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeTier {
    Gold,
    Silver,
    Bronze,
}

impl BadgeTier {
    /// 等级固定边框色
    ///
    /// 等级身份在视觉上不可伪造，任何定制都不能改变这三种颜色
    pub fn border_color(&self) -> &'static str {
        match self {
            Self::Gold => "#FFD700",
            Self::Silver => "#C0C0C0",
            Self::Bronze => "#CD7F32",
        }
    }

    /// 新用户的默认配额
    pub fn default_allocation(&self) -> i32 {
        match self {
            Self::Gold => 5,
            Self::Silver => 10,
            Self::Bronze => 20,
        }
    }
}

/// 授予状态
///
/// 当前授予流程直接置为 Accepted，Pending/Rejected 为接受流程预留
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwardStatus {
    Pending,
    #[default]
    Accepted,
    Rejected,
}

/// 徽章外轮廓形状
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OuterShape {
    #[default]
    Circle,
    Star,
    Heart,
    Hexagon,
    Square,
}

/// 旧版背景类型
///
/// 配置对象格式引入前的标量表示，读取路径仍需兼容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyBackgroundType {
    SolidColor,
    HostedImage,
}

/// 旧版前景类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyForegroundType {
    Text,
    SystemIcon,
    UploadedIcon,
}
