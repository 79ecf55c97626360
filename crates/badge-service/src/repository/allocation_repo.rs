//! 等级配额仓储
//!
//! 配额行在首次读取时按默认值惰性创建。扣减是唯一的写路径，
//! 且必须在授予事务内以条件更新的方式执行。

use sqlx::{PgConnection, PgPool};

use crate::error::Result;
use crate::models::{BadgeTier, UserBadgeAllocation};

const ALL_TIERS: [BadgeTier; 3] = [BadgeTier::Gold, BadgeTier::Silver, BadgeTier::Bronze];

/// 配额仓储
pub struct AllocationRepository {
    pool: PgPool,
}

impl AllocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取用户某等级的配额行，不存在则按默认值创建
    pub async fn get_or_create(&self, user_id: &str, tier: BadgeTier) -> Result<UserBadgeAllocation> {
        // ON CONFLICT DO NOTHING 兼容并发的首次读取
        sqlx::query(
            r#"
            INSERT INTO user_badge_allocations (user_id, tier, remaining)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, tier) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(tier)
        .bind(tier.default_allocation())
        .execute(&self.pool)
        .await?;

        let allocation = sqlx::query_as::<_, UserBadgeAllocation>(
            r#"
            SELECT id, user_id, tier, remaining, created_at, updated_at
            FROM user_badge_allocations
            WHERE user_id = $1 AND tier = $2
            "#,
        )
        .bind(user_id)
        .bind(tier)
        .fetch_one(&self.pool)
        .await?;

        Ok(allocation)
    }

    /// 获取用户全部等级的配额，缺失的行惰性创建
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<UserBadgeAllocation>> {
        let mut allocations = Vec::with_capacity(ALL_TIERS.len());
        for tier in ALL_TIERS {
            allocations.push(self.get_or_create(user_id, tier).await?);
        }
        Ok(allocations)
    }

    /// 在事务中原子扣减配额
    ///
    /// 单条条件更新：`remaining > 0` 守卫写在 WHERE 中，两个并发
    /// 授予不可能同时把同一行减到负数。返回 false 表示配额已耗尽，
    /// 调用方应回滚整个事务。
    pub async fn decrement_in_tx(
        tx: &mut PgConnection,
        user_id: &str,
        tier: BadgeTier,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE user_badge_allocations
            SET remaining = remaining - 1, updated_at = NOW()
            WHERE user_id = $1 AND tier = $2 AND remaining > 0
            "#,
        )
        .bind(user_id)
        .bind(tier)
        .execute(tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tiers_covered() {
        assert_eq!(ALL_TIERS.len(), 3);
        let total: i32 = ALL_TIERS.iter().map(|t| t.default_allocation()).sum();
        assert_eq!(total, 35);
    }
}
