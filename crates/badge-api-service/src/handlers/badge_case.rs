//! 展示柜 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use badge_service::{BadgeCase, CaseView};

use crate::dto::{AddCaseItemRequest, ApiResponse, ReorderRequest, VisibilityRequest};
use crate::error::Result;
use crate::extract::AuthUser;
use crate::state::AppState;

/// 所有者视角读取展示柜（无视可见性）
///
/// GET /api/users/{username}/badgecase
pub async fn get_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<CaseView>>> {
    let view = state.case_service.get_case(&username, &auth.user_id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// 公开读取展示柜（可见性受控，无需认证）
///
/// GET /api/users/{username}/badgecase/public
pub async fn get_public_case(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<CaseView>>> {
    let view = state.case_service.get_public_case(&username).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// 把收到的徽章加入展示柜
///
/// POST /api/users/{username}/badgecase/badges
pub async fn add_to_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(request): Json<AddCaseItemRequest>,
) -> Result<Json<ApiResponse<CaseView>>> {
    let view = state
        .case_service
        .add_to_case(&username, request.badge_instance_id, &auth.user_id)
        .await?;
    Ok(Json(ApiResponse::success(view)))
}

/// 从展示柜移除徽章
///
/// DELETE /api/users/{username}/badgecase/badges/{instanceId}
pub async fn remove_from_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((username, instance_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .case_service
        .remove_from_case(&username, instance_id, &auth.user_id)
        .await?;
    Ok(Json(ApiResponse::<()>::success_empty()))
}

/// 重排展示柜条目（事务内整体生效）
///
/// PATCH /api/users/{username}/badgecase/order
pub async fn reorder_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ApiResponse<CaseView>>> {
    request.validate()?;

    let view = state
        .case_service
        .reorder(&username, &request.items, &auth.user_id)
        .await?;
    Ok(Json(ApiResponse::success(view)))
}

/// 设置展示柜可见性
///
/// PATCH /api/users/{username}/badgecase/visibility
pub async fn set_case_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(request): Json<VisibilityRequest>,
) -> Result<Json<ApiResponse<BadgeCase>>> {
    let case = state
        .case_service
        .set_visibility(&username, request.is_public, &auth.user_id)
        .await?;
    Ok(Json(ApiResponse::success(case)))
}
