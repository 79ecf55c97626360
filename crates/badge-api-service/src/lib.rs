//! 徽章 REST API 服务
//!
//! 对外暴露模板管理、徽章授予、列表查询与展示柜维护的 HTTP 接口。
//! 认证由上游网关完成，本服务信任网关注入的用户标识。

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
