//! 资源协作方
//!
//! 对象存储客户端与系统图标解析

mod icons;
mod store;

pub use icons::{is_known_icon, resolve_icon};
pub use store::{AssetStore, HttpAssetStore, UPLOAD_REF_PREFIX, parse_upload_ref};

#[cfg(test)]
pub use store::MockAssetStore;
