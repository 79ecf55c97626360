//! 用户目录协作方
//!
//! 身份服务维护用户表，本服务只读。以 trait 形式暴露，
//! 便于服务层在测试中 mock。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::Result;

/// 用户目录记录
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    #[sqlx(default)]
    pub display_name: Option<String>,
    #[sqlx(default)]
    pub avatar_url: Option<String>,
}

/// 用户目录接口
///
/// 用户名解析是大小写不敏感的
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 按用户名查找用户
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    /// 按 ID 查找用户
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>>;

    /// 批量获取展示信息（授予列表展示接收者用）
    async fn display_infos(&self, user_ids: &[String]) -> Result<Vec<UserRecord>>;
}

/// PostgreSQL 用户目录实现
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, display_name, avatar_url
            FROM users
            WHERE LOWER(username) = LOWER($1)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, display_name, avatar_url
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn display_infos(&self, user_ids: &[String]) -> Result<Vec<UserRecord>> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, display_name, avatar_url
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
