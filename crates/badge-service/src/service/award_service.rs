//! 授予服务
//!
//! 处理徽章授予的核心业务流程：
//! - 模板所有权校验（只有模板所有者可以用它授予）
//! - 接收者解析（用户名大小写不敏感）
//! - 等级配额检查与原子扣减
//! - 事务性写入（实例、元数据、配额扣减、通知）
//! - 批量授予（逐个独立处理，部分失败不回滚其他）
//!
//! ## 授予流程
//!
//! 1. 模板加载与所有权校验 -> 2. 接收者解析 -> 3. 配额预检查
//!    -> 4. 事务写入（实例 + 元数据 + 条件扣减 + 通知）-> 5. 返回实例
//!
//! 预检查在事务外完成（快速失败，不浪费事务）；配额扣减在事务内
//! 用条件更新兜底，两个并发授予同时通过预检查时，后提交者会因
//! `remaining > 0` 不满足而整体回滚。

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::directory::UserDirectory;
use crate::error::{BadgeError, Result};
use crate::models::{AwardStatus, BadgeInstance, BadgeTemplate, EntityType};
use crate::repository::{
    AllocationRepository, InstanceRepository, NewNotification, NotificationRepository,
    TemplateRepository,
};
use crate::service::dto::{
    AwardedBadge, BadgeCustomizations, BulkAwardFailure, BulkAwardResult, BulkAwardSuccess,
};

/// 授予通知类型
const NOTIFICATION_TYPE_BADGE_RECEIVED: &str = "BADGE_RECEIVED";

/// 批量授予的单个接收者
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRecipient {
    pub username: String,
    #[serde(default)]
    pub customizations: BadgeCustomizations,
}

/// 授予服务
pub struct AwardService<D>
where
    D: UserDirectory,
{
    template_repo: Arc<TemplateRepository>,
    instance_repo: Arc<InstanceRepository>,
    allocation_repo: Arc<AllocationRepository>,
    directory: Arc<D>,
    pool: PgPool,
}

impl<D> AwardService<D>
where
    D: UserDirectory,
{
    pub fn new(
        template_repo: Arc<TemplateRepository>,
        instance_repo: Arc<InstanceRepository>,
        allocation_repo: Arc<AllocationRepository>,
        directory: Arc<D>,
        pool: PgPool,
    ) -> Self {
        Self {
            template_repo,
            instance_repo,
            allocation_repo,
            directory,
            pool,
        }
    }

    /// 授予徽章
    #[instrument(skip(self, customizations), fields(giver_id = %giver_id, template_id = template_id, recipient = %recipient_username))]
    pub async fn give_badge(
        &self,
        giver_id: &str,
        template_id: i64,
        recipient_username: &str,
        customizations: BadgeCustomizations,
    ) -> Result<AwardedBadge> {
        // 1. 模板加载与所有权校验：只有 USER 所有的模板且所有者
        //    本人可以授予（暂无委托颁发模型）
        let template = self
            .template_repo
            .get_template(template_id)
            .await?
            .ok_or(BadgeError::TemplateNotFound(template_id))?;

        if template.owner_type != EntityType::User || template.owner_id != giver_id {
            return Err(BadgeError::NotTemplateOwner(template_id));
        }

        // 2. 接收者解析
        let recipient = self
            .directory
            .find_by_username(recipient_username)
            .await?
            .ok_or_else(|| BadgeError::UserNotFound(recipient_username.to_string()))?;

        // 3. 配额预检查（快速失败；权威判定在事务内的条件扣减）
        if let Some(tier) = template.inherent_tier {
            let allocation = self.allocation_repo.get_or_create(giver_id, tier).await?;
            if allocation.remaining <= 0 {
                return Err(BadgeError::InsufficientAllocation { tier });
            }
        }

        // 4. 事务写入
        let instance = build_instance(&template, giver_id, &recipient.id, &customizations)?;
        let field_defs = self.template_repo.get_field_definitions(template_id).await?;
        let accepted_values = accept_metadata_values(&field_defs, &customizations);

        let mut tx = self.pool.begin().await?;

        let instance_id = InstanceRepository::create_instance_in_tx(&mut tx, &instance).await?;

        if !accepted_values.is_empty() {
            InstanceRepository::insert_metadata_values_in_tx(
                &mut tx,
                instance_id,
                &accepted_values,
            )
            .await?;
        }

        // 条件扣减：remaining > 0 不满足时 0 行受影响，整个事务回滚
        if let Some(tier) = template.inherent_tier {
            let decremented =
                AllocationRepository::decrement_in_tx(&mut tx, giver_id, tier).await?;
            if !decremented {
                return Err(BadgeError::InsufficientAllocation { tier });
            }
        }

        // 通知与实例同事务落库，保证不出现"有实例无通知"的中间态
        let notification = NewNotification {
            user_id: recipient.id.clone(),
            notification_type: NOTIFICATION_TYPE_BADGE_RECEIVED.to_string(),
            title: "你收到了一枚新徽章".to_string(),
            content: Some(format!(
                "{} 授予了你「{}」",
                giver_id,
                instance
                    .override_badge_name
                    .as_deref()
                    .unwrap_or(&template.default_badge_name)
            )),
            link_url: Some(format!("/users/{}/badges/received", recipient.username)),
            source_id: Some(instance_id.to_string()),
            source_type: Some("BADGE_INSTANCE".to_string()),
            actor_id: Some(giver_id.to_string()),
        };
        NotificationRepository::create_in_tx(&mut tx, &notification).await?;

        tx.commit().await?;

        info!(
            instance_id,
            template_id,
            recipient = %recipient.username,
            tiered = template.inherent_tier.is_some(),
            "徽章授予成功"
        );

        // 5. 返回实例（连同模板与元数据）
        let created = self
            .instance_repo
            .get_instance(instance_id)
            .await?
            .ok_or(BadgeError::InstanceNotFound(instance_id))?;
        let metadata = self.instance_repo.get_metadata_values(instance_id).await?;

        Ok(AwardedBadge {
            instance: created,
            template,
            metadata,
        })
    }

    /// 批量授予徽章
    ///
    /// 各接收者相互独立，不跨接收者开事务：前面的接收者可能耗尽
    /// 配额，导致同一批次靠后的接收者合法地失败
    #[instrument(skip(self, recipients), fields(giver_id = %giver_id, template_id = template_id, recipient_count = recipients.len()))]
    pub async fn give_badges_bulk(
        &self,
        giver_id: &str,
        template_id: i64,
        recipients: Vec<BulkRecipient>,
    ) -> Result<BulkAwardResult> {
        let mut successful = Vec::new();
        let mut failed = Vec::new();

        for recipient in recipients {
            match self
                .give_badge(
                    giver_id,
                    template_id,
                    &recipient.username,
                    recipient.customizations,
                )
                .await
            {
                Ok(awarded) => {
                    successful.push(BulkAwardSuccess {
                        username: recipient.username,
                        instance_id: awarded.instance.id,
                    });
                }
                Err(e) => {
                    warn!(username = %recipient.username, error = %e, "批量授予单条失败");
                    failed.push(BulkAwardFailure {
                        username: recipient.username,
                        error_code: e.error_code().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            success = successful.len(),
            failed = failed.len(),
            "批量授予完成"
        );

        Ok(BulkAwardResult { successful, failed })
    }
}

/// 从定制参数组装待插入的实例
fn build_instance(
    template: &BadgeTemplate,
    giver_id: &str,
    recipient_id: &str,
    customizations: &BadgeCustomizations,
) -> Result<BadgeInstance> {
    let now = Utc::now();
    Ok(BadgeInstance {
        id: 0,
        template_id: template.id,
        giver_type: EntityType::User,
        giver_id: giver_id.to_string(),
        receiver_type: EntityType::User,
        receiver_id: recipient_id.to_string(),
        // 当前流程不经过 Pending，直接落为 Accepted
        award_status: AwardStatus::Accepted,
        // 加入展示柜前对外不可见
        api_visible: false,
        assigned_at: now,
        revoked_at: None,
        override_badge_name: customizations.override_badge_name.clone(),
        override_subtitle: customizations.override_subtitle.clone(),
        override_display_description: customizations.override_display_description.clone(),
        override_outer_shape: customizations.override_outer_shape,
        override_border_config: customizations
            .override_border_config
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?,
        override_background_config: customizations
            .override_background_config
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?,
        override_foreground_config: customizations
            .override_foreground_config
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?,
        override_border_color: customizations.override_border_color.clone(),
        override_background_type: customizations.override_background_type,
        override_background_value: customizations.override_background_value.clone(),
        override_foreground_type: customizations.override_foreground_type,
        override_foreground_value: customizations.override_foreground_value.clone(),
        override_foreground_color: customizations.override_foreground_color.clone(),
        measure_value: customizations.measure_value,
        override_measure_best: customizations.override_measure_best,
        override_measure_worst: customizations.override_measure_worst,
        override_measure_best_label: customizations.override_measure_best_label.clone(),
        override_measure_worst_label: customizations.override_measure_worst_label.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// 过滤元数据键值：只接受模板定义过的键，未定义的键忽略并告警
fn accept_metadata_values(
    field_defs: &[crate::models::MetadataFieldDefinition],
    customizations: &BadgeCustomizations,
) -> Vec<(String, String)> {
    customizations
        .metadata_values
        .iter()
        .filter(|v| {
            let known = field_defs.iter().any(|f| f.field_key == v.data_key);
            if !known {
                warn!(data_key = %v.data_key, "忽略未定义的元数据键");
            }
            known
        })
        .map(|v| (v.data_key.clone(), v.data_value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OuterShape;
    use crate::service::dto::MetadataValueInput;
    use crate::visual::VisualConfig;
    use serde_json::json;

    fn test_template(id: i64, owner_id: &str) -> BadgeTemplate {
        BadgeTemplate {
            id,
            template_slug: "mvp".to_string(),
            owner_type: EntityType::User,
            owner_id: owner_id.to_string(),
            authored_by_user_id: owner_id.to_string(),
            default_badge_name: "MVP".to_string(),
            default_subtitle_text: None,
            default_display_description: None,
            default_outer_shape: OuterShape::Circle,
            default_border_config: None,
            default_background_config: None,
            default_foreground_config: None,
            default_border_color: None,
            default_background_type: None,
            default_background_value: None,
            default_foreground_type: None,
            default_foreground_value: None,
            default_foreground_color: None,
            inherent_tier: None,
            defines_measure: false,
            measure_label: None,
            measure_best: None,
            measure_worst: None,
            measure_is_normalizable: false,
            higher_is_better: None,
            measure_best_label: None,
            measure_worst_label: None,
            is_modifiable_by_issuer: false,
            allows_pushed_instance_updates: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_instance_defaults() {
        let template = test_template(1, "user-1");
        let instance =
            build_instance(&template, "user-1", "user-2", &BadgeCustomizations::default())
                .unwrap();

        assert_eq!(instance.award_status, AwardStatus::Accepted);
        assert!(!instance.api_visible);
        assert!(instance.revoked_at.is_none());
        assert_eq!(instance.giver_id, "user-1");
        assert_eq!(instance.receiver_id, "user-2");
        assert_eq!(instance.receiver_type, EntityType::User);
        assert!(instance.override_badge_name.is_none());
    }

    #[test]
    fn test_build_instance_serializes_override_configs() {
        let template = test_template(1, "user-1");
        let customizations = BadgeCustomizations {
            override_border_config: Some(VisualConfig::simple_color("#000000")),
            ..Default::default()
        };
        let instance = build_instance(&template, "user-1", "user-2", &customizations).unwrap();

        assert_eq!(
            instance.override_border_config,
            Some(json!({"type": "simple-color", "version": 1, "color": "#000000"}))
        );
    }

    #[test]
    fn test_accept_metadata_values_filters_unknown_keys() {
        let defs = vec![crate::models::MetadataFieldDefinition {
            id: 1,
            template_id: 1,
            field_key: "season".to_string(),
            label: "Season".to_string(),
            prefix: None,
            suffix: None,
            display_order: 0,
        }];
        let customizations = BadgeCustomizations {
            metadata_values: vec![
                MetadataValueInput {
                    data_key: "season".to_string(),
                    data_value: "2025-S1".to_string(),
                },
                MetadataValueInput {
                    data_key: "not-defined".to_string(),
                    data_value: "42".to_string(),
                },
            ],
            ..Default::default()
        };
        let values = accept_metadata_values(&defs, &customizations);
        assert_eq!(values, vec![("season".to_string(), "2025-S1".to_string())]);
    }

    #[test]
    fn test_bulk_recipient_deserializes_without_customizations() {
        let recipient: BulkRecipient =
            serde_json::from_value(json!({"username": "alice"})).unwrap();
        assert_eq!(recipient.username, "alice");
        assert!(recipient.customizations.override_badge_name.is_none());
    }
}
