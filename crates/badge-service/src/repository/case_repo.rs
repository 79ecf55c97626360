//! 展示柜仓储
//!
//! 展示柜每用户一行，条目的增删改都以展示柜 ID 为作用域。
//! 重排序必须在事务内整体应用。

use sqlx::{PgConnection, PgPool, Row};

use crate::error::Result;
use crate::models::{BadgeCase, BadgeCaseItem};

/// 展示柜仓储
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 展示柜 ====================

    /// 获取用户的展示柜
    pub async fn get_by_user(&self, user_id: &str) -> Result<Option<BadgeCase>> {
        let case = sqlx::query_as::<_, BadgeCase>(
            r#"
            SELECT id, user_id, title, is_public, created_at, updated_at
            FROM badge_cases
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(case)
    }

    /// 获取或创建用户的展示柜
    ///
    /// ON CONFLICT DO NOTHING 兼容并发的首次访问
    pub async fn get_or_create(
        &self,
        user_id: &str,
        title: &str,
        is_public: bool,
    ) -> Result<BadgeCase> {
        sqlx::query(
            r#"
            INSERT INTO badge_cases (user_id, title, is_public)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(is_public)
        .execute(&self.pool)
        .await?;

        let case = sqlx::query_as::<_, BadgeCase>(
            r#"
            SELECT id, user_id, title, is_public, created_at, updated_at
            FROM badge_cases
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(case)
    }

    /// 更新展示柜可见性
    pub async fn set_visibility(&self, case_id: i64, is_public: bool) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE badge_cases
            SET is_public = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(case_id)
        .bind(is_public)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== 条目 ====================

    /// 列出展示柜条目（按展示顺序）
    pub async fn list_items(&self, case_id: i64) -> Result<Vec<BadgeCaseItem>> {
        let items = sqlx::query_as::<_, BadgeCaseItem>(
            r#"
            SELECT id, badge_case_id, badge_instance_id, display_order, added_at
            FROM badge_case_items
            WHERE badge_case_id = $1
            ORDER BY display_order ASC, added_at ASC
            "#,
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// 查询某实例是否已在此展示柜中
    pub async fn get_item(&self, case_id: i64, instance_id: i64) -> Result<Option<BadgeCaseItem>> {
        let item = sqlx::query_as::<_, BadgeCaseItem>(
            r#"
            SELECT id, badge_case_id, badge_instance_id, display_order, added_at
            FROM badge_case_items
            WHERE badge_case_id = $1 AND badge_instance_id = $2
            "#,
        )
        .bind(case_id)
        .bind(instance_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// 追加条目，display_order 取当前最大值 + 1
    pub async fn append_item(&self, case_id: i64, instance_id: i64) -> Result<BadgeCaseItem> {
        let row = sqlx::query(
            r#"
            INSERT INTO badge_case_items (badge_case_id, badge_instance_id, display_order)
            VALUES (
                $1, $2,
                COALESCE((SELECT MAX(display_order) FROM badge_case_items WHERE badge_case_id = $1), 0) + 1
            )
            RETURNING id, display_order, added_at
            "#,
        )
        .bind(case_id)
        .bind(instance_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(BadgeCaseItem {
            id: row.get("id"),
            badge_case_id: case_id,
            badge_instance_id: instance_id,
            display_order: row.get("display_order"),
            added_at: row.get("added_at"),
        })
    }

    /// 删除条目，返回受影响行数
    pub async fn remove_item(&self, case_id: i64, instance_id: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM badge_case_items
            WHERE badge_case_id = $1 AND badge_instance_id = $2
            "#,
        )
        .bind(case_id)
        .bind(instance_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// 在事务中更新单个条目的展示顺序
    ///
    /// 重排序由服务层在一个事务内对每个条目调用，部分失败整体回滚
    pub async fn update_item_order_in_tx(
        tx: &mut PgConnection,
        case_id: i64,
        instance_id: i64,
        display_order: i32,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE badge_case_items
            SET display_order = $3
            WHERE badge_case_id = $1 AND badge_instance_id = $2
            "#,
        )
        .bind(case_id)
        .bind(instance_id)
        .bind(display_order)
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// 事务入口，重排序用
    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, sqlx::Postgres>> {
        Ok(self.pool.begin().await?)
    }
}
