//! 数据库仓储层

mod allocation_repo;
mod case_repo;
mod instance_repo;
mod notification_repo;
mod template_repo;

pub use allocation_repo::AllocationRepository;
pub use case_repo::CaseRepository;
pub use instance_repo::{GivenFilter, InstanceRepository};
pub use notification_repo::{NewNotification, NotificationRepository};
pub use template_repo::{NewMetadataField, TemplateRepository};
