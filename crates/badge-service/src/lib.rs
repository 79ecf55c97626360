//! 徽章服务核心库
//!
//! ViaGuild 徽章系统的领域核心，提供：
//!
//! - **外观配置模型**：多态的边框/背景/前景配置（纯色、托管图片、
//!   可定制 SVG、系统图标）及纯函数式的渲染属性提取
//! - **徽章模板**：可复用的徽章定义，slug 唯一性、资源提交、新旧
//!   格式双向派生
//! - **徽章实例**：逐字段覆盖解析、等级边框强制、撤销与查询
//! - **配额与授予**：等级稀缺性账本和事务性的授予流程
//! - **展示柜**：每用户一个的可排序、可见性受控的徽章陈列
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `visual`: 外观配置模型
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层
//! - `directory`: 用户目录协作方
//! - `assets`: 资源存储与系统图标协作方

pub mod assets;
pub mod directory;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod visual;

pub use assets::{AssetStore, HttpAssetStore};
pub use directory::{PgUserDirectory, UserDirectory, UserRecord};
pub use error::{BadgeError, Result};
pub use models::*;
pub use repository::{
    AllocationRepository, CaseRepository, GivenFilter, InstanceRepository, NewMetadataField,
    NewNotification, NotificationRepository, TemplateRepository,
};
pub use service::{
    AwardService, BadgeDisplayProps, BulkRecipient, CaseService, CaseView, QueryService,
    RevokeService, TemplateService, dto, resolve_display_props,
};
pub use visual::{StyleProps, VisualConfig};
