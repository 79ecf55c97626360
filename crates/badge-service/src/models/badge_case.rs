//! 展示柜实体定义
//!
//! 每个用户有一个展示柜，在首次访问时惰性创建。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 徽章展示柜
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCase {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BadgeCase {
    /// 首次访问时的默认标题
    pub fn default_title(username: &str) -> String {
        format!("{}'s Badge Case", username)
    }
}

/// 展示柜条目
///
/// (badge_case_id, badge_instance_id) 唯一，且一个实例全局最多
/// 出现在一个展示柜中
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCaseItem {
    pub id: i64,
    pub badge_case_id: i64,
    pub badge_instance_id: i64,
    /// 展示顺序，只要求可排序，不要求连续
    pub display_order: i32,
    pub added_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title() {
        assert_eq!(BadgeCase::default_title("alice"), "alice's Badge Case");
    }
}
