//! 徽章列表与撤销 API 处理器

use axum::{
    Json,
    extract::{Path, Query, State},
};

use badge_service::dto::{GivenBadgeView, GivenBadgesQuery};
use badge_service::{BadgeDisplayProps, BadgeError, UserBadgeAllocation};

use crate::dto::ApiResponse;
use crate::error::{ApiError, Result};
use crate::extract::AuthUser;
use crate::state::AppState;

/// 某用户收到的徽章（公开，解析后）
///
/// GET /api/users/{username}/badges/received
pub async fn list_received(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<Vec<BadgeDisplayProps>>>> {
    let badges = state.query_service.list_received(&username).await?;
    Ok(Json(ApiResponse::success(badges)))
}

/// 某用户发出的徽章（仅本人可查）
///
/// GET /api/users/{username}/badges/given
pub async fn list_given(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Query(query): Query<GivenBadgesQuery>,
) -> Result<Json<ApiResponse<Vec<GivenBadgeView>>>> {
    ensure_self(&state, &username, &auth).await?;

    let badges = state.query_service.list_given(&auth.user_id, &query).await?;
    Ok(Json(ApiResponse::success(badges)))
}

/// 某用户的等级配额（仅本人可查）
///
/// GET /api/users/{username}/badges/allocations
pub async fn list_allocations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<Vec<UserBadgeAllocation>>>> {
    ensure_self(&state, &username, &auth).await?;

    let allocations = state.query_service.list_allocations(&auth.user_id).await?;
    Ok(Json(ApiResponse::success(allocations)))
}

/// 撤销徽章实例（仅接收者本人）
///
/// DELETE /api/badges/{instanceId}
pub async fn revoke_badge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(instance_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.revoke_service.revoke(instance_id, &auth.user_id).await?;
    Ok(Json(ApiResponse::<()>::success_empty()))
}

/// 校验路径中的用户名与已认证用户一致
async fn ensure_self(state: &AppState, username: &str, auth: &AuthUser) -> Result<()> {
    use badge_service::UserDirectory;

    let user = state
        .directory
        .find_by_username(username)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::from(BadgeError::UserNotFound(username.to_string())))?;

    if user.id != auth.user_id {
        return Err(ApiError::Forbidden(format!(
            "只能访问本人的数据: {}",
            username
        )));
    }
    Ok(())
}
