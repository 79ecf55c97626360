//! 模板管理 API 处理器

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;

use badge_service::dto::{CreateTemplateInput, TemplateWithFields, UpdateTemplateInput};

use crate::dto::{ApiResponse, OwnerQuery};
use crate::error::Result;
use crate::extract::AuthUser;
use crate::state::AppState;

/// 创建模板
///
/// POST /api/badge-templates
pub async fn create_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTemplateInput>,
) -> Result<Json<ApiResponse<TemplateWithFields>>> {
    let template = state
        .template_service
        .create_template(&auth.user_id, input)
        .await?;

    info!(template_id = template.template.id, "Template created");
    Ok(Json(ApiResponse::success(template)))
}

/// 获取模板详情
///
/// GET /api/badge-templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TemplateWithFields>>> {
    let template = state.template_service.get_template(id).await?;
    Ok(Json(ApiResponse::success(template)))
}

/// 按所有者列出模板
///
/// GET /api/badge-templates?ownerType=USER&ownerId=...
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<ApiResponse<Vec<TemplateWithFields>>>> {
    let templates = state
        .template_service
        .list_templates_by_owner(query.owner_type, &query.owner_id)
        .await?;
    Ok(Json(ApiResponse::success(templates)))
}

/// 更新模板
///
/// PATCH /api/badge-templates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateTemplateInput>,
) -> Result<Json<ApiResponse<TemplateWithFields>>> {
    let template = state
        .template_service
        .update_template(id, &auth.user_id, patch)
        .await?;
    Ok(Json(ApiResponse::success(template)))
}

/// 删除模板
///
/// DELETE /api/badge-templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.template_service.delete_template(id, &auth.user_id).await?;
    Ok(Json(ApiResponse::<()>::success_empty()))
}
