//! 业务服务层

mod award_service;
mod case_service;
pub mod display;
pub mod dto;
mod query_service;
mod revoke_service;
mod template_service;

pub use award_service::{AwardService, BulkRecipient};
pub use case_service::{CaseBadgeView, CaseService, CaseView};
pub use display::{BadgeDisplayProps, MetadataDisplayItem, ResolvedMeasure, resolve_display_props};
pub use query_service::QueryService;
pub use revoke_service::RevokeService;
pub use template_service::TemplateService;

use std::collections::HashMap;

use crate::error::Result;
use crate::models::BadgeInstance;
use crate::repository::{InstanceRepository, TemplateRepository};

/// 批量装配展示属性
///
/// 一次性取回实例涉及的模板、字段定义和元数据，再逐个做纯函数
/// 解析。模板已被删除的实例（外键保证不会发生）防御性跳过。
pub(crate) async fn assemble_display_props(
    template_repo: &TemplateRepository,
    instance_repo: &InstanceRepository,
    instances: Vec<BadgeInstance>,
) -> Result<Vec<display::BadgeDisplayProps>> {
    if instances.is_empty() {
        return Ok(vec![]);
    }

    let mut template_ids: Vec<i64> = instances.iter().map(|i| i.template_id).collect();
    template_ids.sort_unstable();
    template_ids.dedup();
    let instance_ids: Vec<i64> = instances.iter().map(|i| i.id).collect();

    let templates: HashMap<i64, _> = template_repo
        .get_templates_by_ids(&template_ids)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();
    let field_defs = template_repo
        .get_field_definitions_for_templates(&template_ids)
        .await?;
    let metadata = instance_repo
        .get_metadata_for_instances(&instance_ids)
        .await?;

    Ok(instances
        .iter()
        .filter_map(|instance| {
            templates.get(&instance.template_id).map(|template| {
                let defs: Vec<_> = field_defs
                    .iter()
                    .filter(|f| f.template_id == template.id)
                    .cloned()
                    .collect();
                let values: Vec<_> = metadata
                    .iter()
                    .filter(|v| v.instance_id == instance.id)
                    .cloned()
                    .collect();
                display::resolve_display_props(template, instance, &defs, &values)
            })
        })
        .collect())
}
