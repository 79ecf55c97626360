//! 通知仓储
//!
//! 授予流程在事务内写入通知，保证"实例存在当且仅当通知已创建"。
//! 通知的投递由下游管道消费 notifications 表完成，本服务不读取。

use sqlx::{PgConnection, Row};

use crate::error::Result;

/// 新建通知的入参
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: String,
    pub notification_type: String,
    pub title: String,
    pub content: Option<String>,
    pub link_url: Option<String>,
    pub source_id: Option<String>,
    pub source_type: Option<String>,
    pub actor_id: Option<String>,
}

/// 通知仓储
pub struct NotificationRepository;

impl NotificationRepository {
    /// 在事务中写入通知，返回新记录 ID
    pub async fn create_in_tx(tx: &mut PgConnection, notification: &NewNotification) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO notifications
                (user_id, notification_type, title, content, link_url,
                 source_id, source_type, actor_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&notification.user_id)
        .bind(&notification.notification_type)
        .bind(&notification.title)
        .bind(&notification.content)
        .bind(&notification.link_url)
        .bind(&notification.source_id)
        .bind(&notification.source_type)
        .bind(&notification.actor_id)
        .fetch_one(tx)
        .await?;

        Ok(row.get("id"))
    }
}
