//! 资源存储协作方
//!
//! 徽章图片由独立的存储服务托管。模板创建引用 `upload://{assetId}`
//! 形式的临时上传时，需要把资源从临时区提交到永久区——这是一个
//! 提交点：模板一旦引用某资源，该资源就必须在临时区过期窗口之后
//! 继续存在。本服务只与 URL/key 打交道，不接触字节流与桶布局。

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use viaguild_shared::config::AssetStoreConfig;

use crate::error::{BadgeError, Result};

/// 临时上传引用的协议前缀
pub const UPLOAD_REF_PREFIX: &str = "upload://";

/// 解析 `upload://{assetId}` 引用，返回资源 ID
///
/// 非此形式的值（永久 URL、颜色等）返回 None
pub fn parse_upload_ref(value: &str) -> Option<&str> {
    value
        .strip_prefix(UPLOAD_REF_PREFIX)
        .filter(|id| !id.is_empty())
}

/// 资源存储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// 把临时上传提交到永久存储，返回永久 URL
    ///
    /// 存储服务负责删除临时对象
    async fn move_from_temp(&self, temp_asset_id: &str, permanent_key: &str) -> Result<String>;

    /// 直接上传内容（客户端预处理过的 SVG 等），返回 URL
    async fn upload_content(&self, key: &str, content: &[u8], content_type: &str)
    -> Result<String>;
}

#[derive(Deserialize)]
struct StoreResponse {
    url: String,
}

/// HTTP 资源存储客户端
pub struct HttpAssetStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetStore {
    pub fn new(config: &AssetStoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BadgeError::AssetStore(format!("客户端构建失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn move_from_temp(&self, temp_asset_id: &str, permanent_key: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/assets/commit", self.base_url))
            .json(&serde_json::json!({
                "tempAssetId": temp_asset_id,
                "permanentKey": permanent_key,
            }))
            .send()
            .await
            .map_err(|e| BadgeError::AssetStore(format!("提交临时资源失败: {}", e)))?;

        if !response.status().is_success() {
            return Err(BadgeError::AssetStore(format!(
                "提交临时资源失败: status={}, temp_asset_id={}",
                response.status(),
                temp_asset_id
            )));
        }

        let body: StoreResponse = response
            .json()
            .await
            .map_err(|e| BadgeError::AssetStore(format!("存储服务响应无法解析: {}", e)))?;

        Ok(body.url)
    }

    async fn upload_content(
        &self,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<String> {
        let response = self
            .client
            .put(format!("{}/assets/{}", self.base_url, key))
            .header("content-type", content_type)
            .body(content.to_vec())
            .send()
            .await
            .map_err(|e| BadgeError::AssetStore(format!("上传内容失败: {}", e)))?;

        if !response.status().is_success() {
            return Err(BadgeError::AssetStore(format!(
                "上传内容失败: status={}, key={}",
                response.status(),
                key
            )));
        }

        let body: StoreResponse = response
            .json()
            .await
            .map_err(|e| BadgeError::AssetStore(format!("存储服务响应无法解析: {}", e)))?;

        Ok(body.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_ref() {
        assert_eq!(parse_upload_ref("upload://abc-123"), Some("abc-123"));
        assert_eq!(parse_upload_ref("upload://"), None);
        assert_eq!(parse_upload_ref("https://cdn.viaguild.com/x.png"), None);
        assert_eq!(parse_upload_ref("#FF5722"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = AssetStoreConfig {
            base_url: "http://localhost:9000/".to_string(),
            timeout_seconds: 5,
        };
        let store = HttpAssetStore::new(&config).unwrap();
        assert_eq!(store.base_url, "http://localhost:9000");
    }
}
