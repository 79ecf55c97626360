//! 徽章实例仓储
//!
//! 提供实例及其元数据键值的数据访问。授予流程的写入全部走
//! `*_in_tx` 变体，保证与配额扣减、通知写入同属一个事务。

use sqlx::{PgConnection, PgPool, Row};

use crate::error::Result;
use crate::models::{AwardStatus, BadgeInstance, EntityType, MetadataValue};

/// 实例查询返回的全部列
const INSTANCE_COLUMNS: &str = r#"
    id, template_id, giver_type, giver_id, receiver_type, receiver_id,
    award_status, api_visible, assigned_at, revoked_at,
    override_badge_name, override_subtitle, override_display_description,
    override_outer_shape,
    override_border_config, override_background_config, override_foreground_config,
    override_border_color, override_background_type, override_background_value,
    override_foreground_type, override_foreground_value, override_foreground_color,
    measure_value, override_measure_best, override_measure_worst,
    override_measure_best_label, override_measure_worst_label,
    created_at, updated_at
"#;

/// 授予记录查询过滤条件
#[derive(Debug, Clone, Default)]
pub struct GivenFilter {
    pub status: Option<AwardStatus>,
    pub template_id: Option<i64>,
    /// 由服务层从用户名解析得到
    pub receiver_id: Option<String>,
}

/// 实例仓储
pub struct InstanceRepository {
    pool: PgPool,
}

impl InstanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 获取实例
    pub async fn get_instance(&self, id: i64) -> Result<Option<BadgeInstance>> {
        let sql = format!("SELECT {} FROM badge_instances WHERE id = $1", INSTANCE_COLUMNS);
        let instance = sqlx::query_as::<_, BadgeInstance>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(instance)
    }

    /// 列出某接收者的全部有效徽章（未撤销、已接受，最新优先）
    pub async fn list_received(
        &self,
        receiver_type: EntityType,
        receiver_id: &str,
    ) -> Result<Vec<BadgeInstance>> {
        let sql = format!(
            r#"
            SELECT {} FROM badge_instances
            WHERE receiver_type = $1 AND receiver_id = $2
              AND award_status = 'ACCEPTED' AND revoked_at IS NULL
            ORDER BY assigned_at DESC
            "#,
            INSTANCE_COLUMNS
        );
        let instances = sqlx::query_as::<_, BadgeInstance>(&sql)
            .bind(receiver_type)
            .bind(receiver_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(instances)
    }

    /// 列出某授予者发出的徽章，支持按状态/模板/接收者过滤
    ///
    /// 撤销的实例不出现在任何列表中
    pub async fn list_given(&self, giver_id: &str, filter: &GivenFilter) -> Result<Vec<BadgeInstance>> {
        let sql = format!(
            r#"
            SELECT {} FROM badge_instances
            WHERE giver_type = 'USER' AND giver_id = $1
              AND revoked_at IS NULL
              AND ($2::varchar IS NULL OR award_status = $2)
              AND ($3::bigint IS NULL OR template_id = $3)
              AND ($4::varchar IS NULL OR (receiver_type = 'USER' AND receiver_id = $4))
            ORDER BY assigned_at DESC
            "#,
            INSTANCE_COLUMNS
        );
        let instances = sqlx::query_as::<_, BadgeInstance>(&sql)
            .bind(giver_id)
            .bind(filter.status)
            .bind(filter.template_id)
            .bind(&filter.receiver_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(instances)
    }

    /// 获取实例的元数据键值
    pub async fn get_metadata_values(&self, instance_id: i64) -> Result<Vec<MetadataValue>> {
        let values = sqlx::query_as::<_, MetadataValue>(
            r#"
            SELECT id, instance_id, data_key, data_value
            FROM instance_metadata_values
            WHERE instance_id = $1
            "#,
        )
        .bind(instance_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    /// 批量获取多个实例的元数据键值
    pub async fn get_metadata_for_instances(
        &self,
        instance_ids: &[i64],
    ) -> Result<Vec<MetadataValue>> {
        if instance_ids.is_empty() {
            return Ok(vec![]);
        }
        let values = sqlx::query_as::<_, MetadataValue>(
            r#"
            SELECT id, instance_id, data_key, data_value
            FROM instance_metadata_values
            WHERE instance_id = ANY($1)
            "#,
        )
        .bind(instance_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    // ==================== 写入操作 ====================

    /// 撤销实例（软删除）
    ///
    /// 条件更新：已撤销的行不受影响，由返回的行数区分重复撤销
    pub async fn revoke(&self, id: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE badge_instances
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// 更新实例的 API 可见性
    ///
    /// 仅展示柜增删流程调用
    pub async fn set_api_visible(&self, id: i64, visible: bool) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE badge_instances
            SET api_visible = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(visible)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== 事务操作 ====================

    /// 在事务中创建实例，返回新记录 ID
    pub async fn create_instance_in_tx(
        tx: &mut PgConnection,
        instance: &BadgeInstance,
    ) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO badge_instances (
                template_id, giver_type, giver_id, receiver_type, receiver_id,
                award_status, api_visible, assigned_at,
                override_badge_name, override_subtitle, override_display_description,
                override_outer_shape,
                override_border_config, override_background_config, override_foreground_config,
                override_border_color, override_background_type, override_background_value,
                override_foreground_type, override_foreground_value, override_foreground_color,
                measure_value, override_measure_best, override_measure_worst,
                override_measure_best_label, override_measure_worst_label
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)
            RETURNING id
            "#,
        )
        .bind(instance.template_id)
        .bind(instance.giver_type)
        .bind(&instance.giver_id)
        .bind(instance.receiver_type)
        .bind(&instance.receiver_id)
        .bind(instance.award_status)
        .bind(instance.api_visible)
        .bind(instance.assigned_at)
        .bind(&instance.override_badge_name)
        .bind(&instance.override_subtitle)
        .bind(&instance.override_display_description)
        .bind(instance.override_outer_shape)
        .bind(&instance.override_border_config)
        .bind(&instance.override_background_config)
        .bind(&instance.override_foreground_config)
        .bind(&instance.override_border_color)
        .bind(instance.override_background_type)
        .bind(&instance.override_background_value)
        .bind(instance.override_foreground_type)
        .bind(&instance.override_foreground_value)
        .bind(&instance.override_foreground_color)
        .bind(instance.measure_value)
        .bind(instance.override_measure_best)
        .bind(instance.override_measure_worst)
        .bind(&instance.override_measure_best_label)
        .bind(&instance.override_measure_worst_label)
        .fetch_one(tx)
        .await?;

        Ok(row.get("id"))
    }

    /// 在事务中写入实例元数据键值
    pub async fn insert_metadata_values_in_tx(
        tx: &mut PgConnection,
        instance_id: i64,
        values: &[(String, String)],
    ) -> Result<()> {
        for (key, value) in values {
            sqlx::query(
                r#"
                INSERT INTO instance_metadata_values (instance_id, data_key, data_value)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(instance_id)
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_given_filter_default_is_unfiltered() {
        let filter = GivenFilter::default();
        assert!(filter.status.is_none());
        assert!(filter.template_id.is_none());
        assert!(filter.receiver_id.is_none());
    }

    #[test]
    fn test_instance_columns_consistency() {
        let columns: Vec<&str> = INSTANCE_COLUMNS
            .split(',')
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        assert_eq!(columns.len(), 30);
        assert!(columns.contains(&"revoked_at"));
        assert!(columns.contains(&"measure_value"));
    }
}
