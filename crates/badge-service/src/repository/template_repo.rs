//! 徽章模板仓储
//!
//! 提供模板及其元数据字段定义的数据访问。slug 唯一性检查在
//! 数据库层面以大小写不敏感方式执行。

use sqlx::{PgConnection, PgPool, Row};

use crate::error::Result;
use crate::models::{BadgeTemplate, EntityType, MetadataFieldDefinition};

/// 模板查询返回的全部列，插入/更新语句与之保持一致
const TEMPLATE_COLUMNS: &str = r#"
    id, template_slug, owner_type, owner_id, authored_by_user_id,
    default_badge_name, default_subtitle_text, default_display_description,
    default_outer_shape,
    default_border_config, default_background_config, default_foreground_config,
    default_border_color, default_background_type, default_background_value,
    default_foreground_type, default_foreground_value, default_foreground_color,
    inherent_tier, defines_measure, measure_label, measure_best, measure_worst,
    measure_is_normalizable, higher_is_better, measure_best_label, measure_worst_label,
    is_modifiable_by_issuer, allows_pushed_instance_updates,
    created_at, updated_at
"#;

/// 模板仓储
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 获取模板
    pub async fn get_template(&self, id: i64) -> Result<Option<BadgeTemplate>> {
        let sql = format!("SELECT {} FROM badge_templates WHERE id = $1", TEMPLATE_COLUMNS);
        let template = sqlx::query_as::<_, BadgeTemplate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(template)
    }

    /// 列出某所有者的全部模板
    pub async fn list_by_owner(
        &self,
        owner_type: EntityType,
        owner_id: &str,
    ) -> Result<Vec<BadgeTemplate>> {
        let sql = format!(
            r#"
            SELECT {} FROM badge_templates
            WHERE owner_type = $1 AND owner_id = $2
            ORDER BY created_at DESC
            "#,
            TEMPLATE_COLUMNS
        );
        let templates = sqlx::query_as::<_, BadgeTemplate>(&sql)
            .bind(owner_type)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(templates)
    }

    /// 批量获取模板
    pub async fn get_templates_by_ids(&self, ids: &[i64]) -> Result<Vec<BadgeTemplate>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!(
            "SELECT {} FROM badge_templates WHERE id = ANY($1)",
            TEMPLATE_COLUMNS
        );
        let templates = sqlx::query_as::<_, BadgeTemplate>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(templates)
    }

    /// 检查 slug 是否已被占用（大小写不敏感）
    ///
    /// `exclude_id` 用于更新场景排除模板自身
    pub async fn slug_exists(
        &self,
        slug: &str,
        owner_type: EntityType,
        owner_id: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM badge_templates
                WHERE LOWER(template_slug) = LOWER($1)
                  AND owner_type = $2 AND owner_id = $3
                  AND ($4::bigint IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(slug)
        .bind(owner_type)
        .bind(owner_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// 统计引用模板的未撤销实例数
    pub async fn count_live_instances(&self, template_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM badge_instances
            WHERE template_id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(template_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// 获取模板的元数据字段定义（按展示顺序）
    pub async fn get_field_definitions(
        &self,
        template_id: i64,
    ) -> Result<Vec<MetadataFieldDefinition>> {
        let fields = sqlx::query_as::<_, MetadataFieldDefinition>(
            r#"
            SELECT id, template_id, field_key, label, prefix, suffix, display_order
            FROM template_metadata_fields
            WHERE template_id = $1
            ORDER BY display_order ASC
            "#,
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fields)
    }

    /// 批量获取多个模板的字段定义
    pub async fn get_field_definitions_for_templates(
        &self,
        template_ids: &[i64],
    ) -> Result<Vec<MetadataFieldDefinition>> {
        if template_ids.is_empty() {
            return Ok(vec![]);
        }
        let fields = sqlx::query_as::<_, MetadataFieldDefinition>(
            r#"
            SELECT id, template_id, field_key, label, prefix, suffix, display_order
            FROM template_metadata_fields
            WHERE template_id = ANY($1)
            ORDER BY template_id, display_order ASC
            "#,
        )
        .bind(template_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(fields)
    }

    // ==================== 写入操作 ====================

    /// 创建模板，返回新记录 ID
    ///
    /// `template.id` 被忽略，时间戳由数据库生成
    pub async fn create_template(&self, template: &BadgeTemplate) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO badge_templates (
                template_slug, owner_type, owner_id, authored_by_user_id,
                default_badge_name, default_subtitle_text, default_display_description,
                default_outer_shape,
                default_border_config, default_background_config, default_foreground_config,
                default_border_color, default_background_type, default_background_value,
                default_foreground_type, default_foreground_value, default_foreground_color,
                inherent_tier, defines_measure, measure_label, measure_best, measure_worst,
                measure_is_normalizable, higher_is_better, measure_best_label, measure_worst_label,
                is_modifiable_by_issuer, allows_pushed_instance_updates
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
            RETURNING id
            "#,
        )
        .bind(&template.template_slug)
        .bind(template.owner_type)
        .bind(&template.owner_id)
        .bind(&template.authored_by_user_id)
        .bind(&template.default_badge_name)
        .bind(&template.default_subtitle_text)
        .bind(&template.default_display_description)
        .bind(template.default_outer_shape)
        .bind(&template.default_border_config)
        .bind(&template.default_background_config)
        .bind(&template.default_foreground_config)
        .bind(&template.default_border_color)
        .bind(template.default_background_type)
        .bind(&template.default_background_value)
        .bind(template.default_foreground_type)
        .bind(&template.default_foreground_value)
        .bind(&template.default_foreground_color)
        .bind(template.inherent_tier)
        .bind(template.defines_measure)
        .bind(&template.measure_label)
        .bind(template.measure_best)
        .bind(template.measure_worst)
        .bind(template.measure_is_normalizable)
        .bind(template.higher_is_better)
        .bind(&template.measure_best_label)
        .bind(&template.measure_worst_label)
        .bind(template.is_modifiable_by_issuer)
        .bind(template.allows_pushed_instance_updates)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    /// 更新模板（全行覆盖）
    pub async fn update_template(&self, template: &BadgeTemplate) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE badge_templates SET
                template_slug = $2,
                default_badge_name = $3,
                default_subtitle_text = $4,
                default_display_description = $5,
                default_outer_shape = $6,
                default_border_config = $7,
                default_background_config = $8,
                default_foreground_config = $9,
                default_border_color = $10,
                default_background_type = $11,
                default_background_value = $12,
                default_foreground_type = $13,
                default_foreground_value = $14,
                default_foreground_color = $15,
                inherent_tier = $16,
                defines_measure = $17,
                measure_label = $18,
                measure_best = $19,
                measure_worst = $20,
                measure_is_normalizable = $21,
                higher_is_better = $22,
                measure_best_label = $23,
                measure_worst_label = $24,
                is_modifiable_by_issuer = $25,
                allows_pushed_instance_updates = $26,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(template.id)
        .bind(&template.template_slug)
        .bind(&template.default_badge_name)
        .bind(&template.default_subtitle_text)
        .bind(&template.default_display_description)
        .bind(template.default_outer_shape)
        .bind(&template.default_border_config)
        .bind(&template.default_background_config)
        .bind(&template.default_foreground_config)
        .bind(&template.default_border_color)
        .bind(template.default_background_type)
        .bind(&template.default_background_value)
        .bind(template.default_foreground_type)
        .bind(&template.default_foreground_value)
        .bind(&template.default_foreground_color)
        .bind(template.inherent_tier)
        .bind(template.defines_measure)
        .bind(&template.measure_label)
        .bind(template.measure_best)
        .bind(template.measure_worst)
        .bind(template.measure_is_normalizable)
        .bind(template.higher_is_better)
        .bind(&template.measure_best_label)
        .bind(&template.measure_worst_label)
        .bind(template.is_modifiable_by_issuer)
        .bind(template.allows_pushed_instance_updates)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 删除模板（字段定义随外键级联删除）
    pub async fn delete_template(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM badge_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// 替换模板的元数据字段定义
    ///
    /// 先删后插，保证 display_order 与入参一致
    pub async fn replace_field_definitions(
        &self,
        template_id: i64,
        fields: &[NewMetadataField],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM template_metadata_fields WHERE template_id = $1")
            .bind(template_id)
            .execute(&mut *tx)
            .await?;

        Self::insert_field_definitions_in_tx(&mut tx, template_id, fields).await?;

        tx.commit().await?;
        Ok(())
    }

    /// 在事务中插入字段定义
    pub async fn insert_field_definitions_in_tx(
        tx: &mut PgConnection,
        template_id: i64,
        fields: &[NewMetadataField],
    ) -> Result<()> {
        for (index, field) in fields.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO template_metadata_fields
                    (template_id, field_key, label, prefix, suffix, display_order)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(template_id)
            .bind(&field.field_key)
            .bind(&field.label)
            .bind(&field.prefix)
            .bind(&field.suffix)
            .bind(field.display_order.unwrap_or(index as i32))
            .execute(&mut *tx)
            .await?;
        }
        Ok(())
    }
}

/// 新建元数据字段定义的入参
#[derive(Debug, Clone)]
pub struct NewMetadataField {
    pub field_key: String,
    pub label: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// 为空时按入参顺序编号
    pub display_order: Option<i32>,
}
