//! 领域模型定义

mod badge_case;
mod enums;
mod instance;
mod template;

pub use badge_case::{BadgeCase, BadgeCaseItem};
pub use enums::{
    AwardStatus, BadgeTier, EntityType, LegacyBackgroundType, LegacyForegroundType, OuterShape,
};
pub use instance::{BadgeInstance, MetadataValue, UserBadgeAllocation};
pub use template::{BadgeTemplate, MetadataFieldDefinition};
