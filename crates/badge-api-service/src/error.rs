//! API 错误类型定义
//!
//! 领域错误按变体映射到 HTTP 状态码——不做消息文本匹配。
//! 错误码是 API 契约的一部分，客户端用它做条件分支。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use badge_service::BadgeError;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("未授权访问")]
    Unauthorized,

    #[error("禁止访问: {0}")]
    Forbidden(String),

    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error(transparent)]
    Badge(#[from] BadgeError),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Badge(err) => match err {
                // 资源不存在（含被撤销/可见性过滤排除的情况）
                BadgeError::TemplateNotFound(_)
                | BadgeError::InstanceNotFound(_)
                | BadgeError::UserNotFound(_)
                | BadgeError::CaseNotFound(_)
                | BadgeError::NotInCase(_) => StatusCode::NOT_FOUND,

                // 所有权/授权不足；配额耗尽沿用 403 契约
                BadgeError::NotTemplateOwner(_)
                | BadgeError::NotBadgeReceiver(_)
                | BadgeError::NotCaseOwner(_)
                | BadgeError::PrivateCase(_)
                | BadgeError::InsufficientAllocation { .. } => StatusCode::FORBIDDEN,

                // 唯一性或状态冲突
                BadgeError::TemplateSlugConflict(_)
                | BadgeError::TemplateSlugExhausted(_)
                | BadgeError::TemplateInUse { .. }
                | BadgeError::AlreadyRevoked(_)
                | BadgeError::AlreadyInCase(_) => StatusCode::CONFLICT,

                BadgeError::Validation(_) => StatusCode::BAD_REQUEST,

                BadgeError::AssetStore(_)
                | BadgeError::Database(_)
                | BadgeError::Serialization(_)
                | BadgeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Badge(err) => err.error_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Badge(err) if !err.is_business_error() => {
                tracing::error!(error = %err, code = err.error_code(), "系统错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// API 层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use badge_service::BadgeTier;

    /// 构造代表性错误变体及其期望的 (StatusCode, error_code) 映射。
    /// 状态码与错误码都是对外契约，变更即破坏性变更，逐一锁定。
    fn representative_variants() -> Vec<(ApiError, StatusCode, &'static str)> {
        vec![
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (
                ApiError::Forbidden("not yours".into()),
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
            ),
            (
                ApiError::Validation("bad input".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                BadgeError::TemplateNotFound(1).into(),
                StatusCode::NOT_FOUND,
                "TEMPLATE_NOT_FOUND",
            ),
            (
                BadgeError::InstanceNotFound(2).into(),
                StatusCode::NOT_FOUND,
                "INSTANCE_NOT_FOUND",
            ),
            (
                BadgeError::UserNotFound("bob".into()).into(),
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
            ),
            (
                BadgeError::CaseNotFound("bob".into()).into(),
                StatusCode::NOT_FOUND,
                "CASE_NOT_FOUND",
            ),
            (
                BadgeError::NotInCase(3).into(),
                StatusCode::NOT_FOUND,
                "NOT_IN_CASE",
            ),
            (
                BadgeError::NotTemplateOwner(4).into(),
                StatusCode::FORBIDDEN,
                "NOT_TEMPLATE_OWNER",
            ),
            (
                BadgeError::NotBadgeReceiver(5).into(),
                StatusCode::FORBIDDEN,
                "NOT_BADGE_RECEIVER",
            ),
            (
                BadgeError::NotCaseOwner("bob".into()).into(),
                StatusCode::FORBIDDEN,
                "NOT_CASE_OWNER",
            ),
            (
                BadgeError::PrivateCase("bob".into()).into(),
                StatusCode::FORBIDDEN,
                "PRIVATE_CASE",
            ),
            (
                BadgeError::InsufficientAllocation {
                    tier: BadgeTier::Gold,
                }
                .into(),
                StatusCode::FORBIDDEN,
                "INSUFFICIENT_ALLOCATION",
            ),
            (
                BadgeError::TemplateSlugConflict("mvp".into()).into(),
                StatusCode::CONFLICT,
                "TEMPLATE_SLUG_CONFLICT",
            ),
            (
                BadgeError::TemplateInUse {
                    template_id: 6,
                    live_instances: 2,
                }
                .into(),
                StatusCode::CONFLICT,
                "TEMPLATE_IN_USE",
            ),
            (
                BadgeError::AlreadyRevoked(7).into(),
                StatusCode::CONFLICT,
                "ALREADY_REVOKED",
            ),
            (
                BadgeError::AlreadyInCase(8).into(),
                StatusCode::CONFLICT,
                "ALREADY_IN_CASE",
            ),
            (
                BadgeError::Validation("missing slug".into()).into(),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                BadgeError::Internal("boom".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
            (
                BadgeError::AssetStore("asset svc down".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "ASSET_STORE_ERROR",
            ),
        ]
    }

    #[test]
    fn test_status_code_mapping() {
        for (error, expected_status, label) in representative_variants() {
            assert_eq!(
                error.status_code(),
                expected_status,
                "状态码不匹配: variant={label}"
            );
        }
    }

    #[test]
    fn test_error_code_mapping() {
        for (error, _status, expected_code) in representative_variants() {
            assert_eq!(
                error.error_code(),
                expected_code,
                "错误码不匹配: expected={expected_code}"
            );
        }
    }

    #[tokio::test]
    async fn test_into_response_body_structure() {
        let response = ApiError::from(BadgeError::TemplateNotFound(42)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("读取响应体失败");
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], json!("TEMPLATE_NOT_FOUND"));
        assert!(body["message"].as_str().unwrap().contains("42"));
        assert!(body["data"].is_null());
    }

    /// 系统级错误不应把内部细节（连接串、SQL 等）带进响应
    #[tokio::test]
    async fn test_system_errors_hide_internal_details() {
        let err = ApiError::from(BadgeError::Internal(
            "stack overflow at badge_service::service".into(),
        ));
        let response = err.into_response();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        let message = body["message"].as_str().unwrap();

        assert!(!message.contains("stack overflow"));
        assert!(message.contains("服务内部错误"));
    }

    /// 业务错误保留原始描述，帮助用户定位问题
    #[tokio::test]
    async fn test_business_errors_preserve_message() {
        let err = ApiError::from(BadgeError::UserNotFound("alice".into()));
        let response = err.into_response();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert!(body["message"].as_str().unwrap().contains("alice"));
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::{ValidationError, ValidationErrors};

        let mut errors = ValidationErrors::new();
        let mut field_error = ValidationError::new("length");
        field_error.message = Some("用户名长度不合法".into());
        errors.add("recipientUsername", field_error);

        let api_error: ApiError = errors.into();
        assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error_code(), "VALIDATION_ERROR");
        assert!(api_error.to_string().contains("recipientUsername"));
    }
}
