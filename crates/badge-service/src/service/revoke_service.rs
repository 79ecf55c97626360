//! 撤销服务
//!
//! 撤销是软删除：实例保留在库中但从所有列表和配额查询中消失。
//! 只有接收者本人可以撤销自己收到的徽章。

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{BadgeError, Result};
use crate::models::EntityType;
use crate::repository::InstanceRepository;

/// 撤销服务
pub struct RevokeService {
    instance_repo: Arc<InstanceRepository>,
}

impl RevokeService {
    pub fn new(instance_repo: Arc<InstanceRepository>) -> Self {
        Self { instance_repo }
    }

    /// 撤销徽章实例
    ///
    /// 重复撤销返回 AlreadyRevoked 而非成功，调用方可据此区分
    #[instrument(skip(self), fields(actor_id = %actor_id))]
    pub async fn revoke(&self, instance_id: i64, actor_id: &str) -> Result<()> {
        let instance = self
            .instance_repo
            .get_instance(instance_id)
            .await?
            .ok_or(BadgeError::InstanceNotFound(instance_id))?;

        if instance.receiver_type != EntityType::User || instance.receiver_id != actor_id {
            return Err(BadgeError::NotBadgeReceiver(instance_id));
        }

        if instance.is_revoked() {
            return Err(BadgeError::AlreadyRevoked(instance_id));
        }

        // 条件更新兜底并发的重复撤销：0 行受影响说明已被他处撤销
        let affected = self.instance_repo.revoke(instance_id).await?;
        if affected == 0 {
            return Err(BadgeError::AlreadyRevoked(instance_id));
        }

        info!(instance_id, "徽章已撤销");
        Ok(())
    }
}
