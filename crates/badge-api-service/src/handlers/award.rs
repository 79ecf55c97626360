//! 徽章授予 API 处理器

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use badge_service::dto::{AwardedBadge, BulkAwardResult};

use crate::dto::{ApiResponse, BulkGiveRequest, GiveBadgeRequest};
use crate::error::Result;
use crate::extract::AuthUser;
use crate::state::AppState;

/// 授予单枚徽章
///
/// POST /api/badges/give
pub async fn give_badge(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<GiveBadgeRequest>,
) -> Result<Json<ApiResponse<AwardedBadge>>> {
    request.validate()?;

    let awarded = state
        .award_service
        .give_badge(
            &auth.user_id,
            request.template_id,
            &request.recipient_username,
            request.customizations,
        )
        .await?;

    Ok(Json(ApiResponse::success(awarded)))
}

/// 批量授予徽章
///
/// POST /api/badges/give/bulk
///
/// 逐个接收者独立处理；存在失败项时返回 207，由响应体区分
/// 成功与失败的接收者
pub async fn give_badges_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<BulkGiveRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BulkAwardResult>>)> {
    request.validate()?;

    let result = state
        .award_service
        .give_badges_bulk(&auth.user_id, request.template_id, request.recipients)
        .await?;

    let status = if result.failed.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    Ok((status, Json(ApiResponse::success(result))))
}
