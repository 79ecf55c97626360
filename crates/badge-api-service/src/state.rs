//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use badge_service::{
    AllocationRepository, AwardService, CaseRepository, CaseService, HttpAssetStore,
    InstanceRepository, PgUserDirectory, QueryService, RevokeService, TemplateRepository,
    TemplateService,
};
use viaguild_shared::config::AssetStoreConfig;

/// Axum 应用共享状态
///
/// 服务通过 Arc 在 handler 间共享；仓储由服务内部持有
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub directory: Arc<PgUserDirectory>,
    pub template_service: Arc<TemplateService<HttpAssetStore>>,
    pub award_service: Arc<AwardService<PgUserDirectory>>,
    pub query_service: Arc<QueryService<PgUserDirectory>>,
    pub revoke_service: Arc<RevokeService>,
    pub case_service: Arc<CaseService<PgUserDirectory>>,
}

impl AppState {
    /// 组装全部服务
    pub fn new(pool: PgPool, asset_store_config: &AssetStoreConfig) -> badge_service::Result<Self> {
        let template_repo = Arc::new(TemplateRepository::new(pool.clone()));
        let instance_repo = Arc::new(InstanceRepository::new(pool.clone()));
        let allocation_repo = Arc::new(AllocationRepository::new(pool.clone()));
        let case_repo = Arc::new(CaseRepository::new(pool.clone()));
        let directory = Arc::new(PgUserDirectory::new(pool.clone()));
        let asset_store = Arc::new(HttpAssetStore::new(asset_store_config)?);

        let template_service = Arc::new(TemplateService::new(
            template_repo.clone(),
            asset_store,
        ));
        let award_service = Arc::new(AwardService::new(
            template_repo.clone(),
            instance_repo.clone(),
            allocation_repo.clone(),
            directory.clone(),
            pool.clone(),
        ));
        let query_service = Arc::new(QueryService::new(
            template_repo.clone(),
            instance_repo.clone(),
            allocation_repo,
            directory.clone(),
        ));
        let revoke_service = Arc::new(RevokeService::new(instance_repo.clone()));
        let case_service = Arc::new(CaseService::new(
            case_repo,
            instance_repo,
            template_repo,
            directory.clone(),
        ));

        Ok(Self {
            pool,
            directory,
            template_service,
            award_service,
            query_service,
            revoke_service,
            case_service,
        })
    }
}
