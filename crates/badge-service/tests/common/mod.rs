//! 集成测试辅助
//!
//! 所有集成测试依赖 DATABASE_URL 指向一个已应用迁移的 PostgreSQL。

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use badge_service::{AssetStore, BadgeTier, Result};

/// 从环境变量建立连接池，未设置则 panic
pub async fn setup_pool() -> PgPool {
    let url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("数据库连接失败")
}

/// 每次运行唯一的后缀，避免跨运行的数据污染
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// 插入测试用户（幂等）
pub async fn seed_user(pool: &PgPool, user_id: &str, username: &str) {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, display_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(format!("Display {}", username))
    .execute(pool)
    .await
    .expect("插入测试用户失败");
}

/// 把用户某等级的配额固定为给定值（存在则覆盖）
pub async fn seed_allocation(pool: &PgPool, user_id: &str, tier: BadgeTier, remaining: i32) {
    sqlx::query(
        r#"
        INSERT INTO user_badge_allocations (user_id, tier, remaining)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, tier) DO UPDATE SET remaining = EXCLUDED.remaining
        "#,
    )
    .bind(user_id)
    .bind(tier)
    .bind(remaining)
    .execute(pool)
    .await
    .expect("写入配额失败");
}

/// 测试用资源存储：不访问网络，原样返回可预测的 URL
pub struct NoopAssetStore;

#[async_trait]
impl AssetStore for NoopAssetStore {
    async fn move_from_temp(&self, temp_asset_id: &str, permanent_key: &str) -> Result<String> {
        Ok(format!(
            "https://assets.test/{}?from={}",
            permanent_key, temp_asset_id
        ))
    }

    async fn upload_content(
        &self,
        key: &str,
        _content: &[u8],
        _content_type: &str,
    ) -> Result<String> {
        Ok(format!("https://assets.test/{}", key))
    }
}
