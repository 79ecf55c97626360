//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::{handlers, state::AppState};

/// 构建模板管理路由
pub fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/badge-templates", post(handlers::template::create_template))
        .route("/badge-templates", get(handlers::template::list_templates))
        .route(
            "/badge-templates/{id}",
            get(handlers::template::get_template),
        )
        .route(
            "/badge-templates/{id}",
            patch(handlers::template::update_template),
        )
        .route(
            "/badge-templates/{id}",
            delete(handlers::template::delete_template),
        )
}

/// 构建授予与撤销路由
pub fn award_routes() -> Router<AppState> {
    Router::new()
        .route("/badges/give", post(handlers::award::give_badge))
        .route("/badges/give/bulk", post(handlers::award::give_badges_bulk))
        .route("/badges/{id}", delete(handlers::badge::revoke_badge))
}

/// 构建用户徽章列表路由
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{username}/badges/received",
            get(handlers::badge::list_received),
        )
        .route(
            "/users/{username}/badges/given",
            get(handlers::badge::list_given),
        )
        .route(
            "/users/{username}/badges/allocations",
            get(handlers::badge::list_allocations),
        )
}

/// 构建展示柜路由
pub fn badge_case_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{username}/badgecase",
            get(handlers::badge_case::get_case),
        )
        .route(
            "/users/{username}/badgecase/public",
            get(handlers::badge_case::get_public_case),
        )
        .route(
            "/users/{username}/badgecase/badges",
            post(handlers::badge_case::add_to_case),
        )
        .route(
            "/users/{username}/badgecase/badges/{instance_id}",
            delete(handlers::badge_case::remove_from_case),
        )
        .route(
            "/users/{username}/badgecase/order",
            patch(handlers::badge_case::reorder_case),
        )
        .route(
            "/users/{username}/badgecase/visibility",
            patch(handlers::badge_case::set_case_visibility),
        )
}

/// 构建完整的 API 路由
///
/// 返回所有 API 路由（不含前缀，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(template_routes())
        .merge(award_routes())
        .merge(listing_routes())
        .merge(badge_case_routes())
}
