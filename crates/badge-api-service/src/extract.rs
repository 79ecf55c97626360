//! 请求提取器
//!
//! 认证由上游网关完成：网关校验会话后把用户 ID 注入
//! `x-user-id` 请求头，本服务信任该值为已验证身份。

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// 网关注入的用户标识头
pub const USER_ID_HEADER: &str = "x-user-id";

/// 已认证用户
///
/// 头缺失或为空时拒绝请求（401）
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        Ok(AuthUser {
            user_id: user_id.to_string(),
        })
    }
}

/// 可选认证
///
/// 公开路由也可能带着身份访问（如所有者看自己的私密展示柜），
/// 头缺失时不拒绝
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<AuthUser, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_auth_user_present() {
        let user = extract(Some("user-42")).await.unwrap();
        assert_eq!(user.user_id, "user-42");
    }

    #[tokio::test]
    async fn test_auth_user_missing_header_rejected() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn test_auth_user_blank_header_rejected() {
        let err = extract(Some("   ")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
