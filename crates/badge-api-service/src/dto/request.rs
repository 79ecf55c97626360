//! 请求 DTO 定义
//!
//! 模板创建/更新与定制参数直接复用服务层的输入结构，
//! 这里只定义 HTTP 侧特有的包装。

use serde::Deserialize;
use validator::Validate;

use badge_service::dto::{BadgeCustomizations, ReorderEntry};
use badge_service::{BulkRecipient, EntityType};

/// 授予徽章请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GiveBadgeRequest {
    pub template_id: i64,
    #[validate(length(min = 1, max = 64, message = "接收者用户名长度必须在1-64个字符之间"))]
    pub recipient_username: String,
    #[serde(default)]
    pub customizations: BadgeCustomizations,
}

/// 批量授予请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkGiveRequest {
    pub template_id: i64,
    #[validate(length(min = 1, max = 100, message = "单批接收者数量必须在1-100之间"))]
    pub recipients: Vec<BulkRecipient>,
}

/// 按所有者查询模板
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub owner_type: EntityType,
    pub owner_id: String,
}

/// 加入展示柜请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCaseItemRequest {
    pub badge_instance_id: i64,
}

/// 展示柜重排序请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[validate(length(min = 1, message = "重排序条目不能为空"))]
    pub items: Vec<ReorderEntry>,
}

/// 展示柜可见性请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    pub is_public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_give_request_validation() {
        let request: GiveBadgeRequest = serde_json::from_value(json!({
            "templateId": 1,
            "recipientUsername": "alice"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let request: GiveBadgeRequest = serde_json::from_value(json!({
            "templateId": 1,
            "recipientUsername": ""
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bulk_request_rejects_empty_recipients() {
        let request: BulkGiveRequest = serde_json::from_value(json!({
            "templateId": 1,
            "recipients": []
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_reorder_request_rejects_empty_items() {
        let request: ReorderRequest = serde_json::from_value(json!({"items": []})).unwrap();
        assert!(request.validate().is_err());

        let request: ReorderRequest = serde_json::from_value(json!({
            "items": [{"instanceId": 1, "displayOrder": 2}]
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }
}
