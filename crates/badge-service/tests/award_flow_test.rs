//! 授予流程集成测试
//!
//! 使用真实 PostgreSQL 测试完整授予流程：模板创建（slug 冲突加
//! 后缀）、等级配额扣减、事务原子性、批量部分失败。授予事务内有
//! 条件扣减和通知写入，无法用纯 mock 覆盖，因此需要集成测试。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test award_flow_test -- --ignored
//! ```

use std::sync::Arc;

use sqlx::PgPool;

use badge_service::dto::{BadgeCustomizations, CreateTemplateInput};
use badge_service::{
    AllocationRepository, AwardService, BadgeError, BadgeTier, BulkRecipient, InstanceRepository,
    PgUserDirectory, QueryService, TemplateRepository, TemplateService,
};

mod common;
use common::{seed_allocation, seed_user, setup_pool, unique_suffix};

fn award_service(pool: &PgPool) -> AwardService<PgUserDirectory> {
    AwardService::new(
        Arc::new(TemplateRepository::new(pool.clone())),
        Arc::new(InstanceRepository::new(pool.clone())),
        Arc::new(AllocationRepository::new(pool.clone())),
        Arc::new(PgUserDirectory::new(pool.clone())),
        pool.clone(),
    )
}

fn query_service(pool: &PgPool) -> QueryService<PgUserDirectory> {
    QueryService::new(
        Arc::new(TemplateRepository::new(pool.clone())),
        Arc::new(InstanceRepository::new(pool.clone())),
        Arc::new(AllocationRepository::new(pool.clone())),
        Arc::new(PgUserDirectory::new(pool.clone())),
    )
}

fn template_service(pool: &PgPool) -> TemplateService<common::NoopAssetStore> {
    TemplateService::new(
        Arc::new(TemplateRepository::new(pool.clone())),
        Arc::new(common::NoopAssetStore),
    )
}

/// 创建一个归 giver 所有的简单模板
async fn create_template(
    pool: &PgPool,
    giver_id: &str,
    slug: &str,
    tier: Option<BadgeTier>,
) -> i64 {
    let service = template_service(pool);
    let input = CreateTemplateInput {
        template_slug: slug.to_string(),
        default_badge_name: format!("Badge {}", slug),
        inherent_tier: tier,
        ..Default::default()
    };
    service
        .create_template(giver_id, input)
        .await
        .expect("创建模板失败")
        .template
        .id
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_slug_conflict_gets_suffixed() {
    let pool = setup_pool().await;
    let suffix = unique_suffix();
    let giver = format!("it-slug-giver-{}", suffix);
    seed_user(&pool, &giver, &format!("it_slug_giver_{}", suffix)).await;

    let slug = format!("dup-slug-{}", suffix);
    let service = template_service(&pool);

    let first = service
        .create_template(
            &giver,
            CreateTemplateInput {
                template_slug: slug.clone(),
                default_badge_name: "First".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(first.template.template_slug, slug);

    // 同名再创建：自动追加 -1 后缀而非失败
    let second = service
        .create_template(
            &giver,
            CreateTemplateInput {
                // 大小写不同也视为冲突
                template_slug: slug.to_uppercase(),
                default_badge_name: "Second".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        second.template.template_slug,
        format!("{}-1", slug.to_uppercase())
    );
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_give_badge_decrements_allocation_and_notifies() {
    let pool = setup_pool().await;
    let suffix = unique_suffix();
    let giver = format!("it-award-giver-{}", suffix);
    let receiver = format!("it-award-recv-{}", suffix);
    let receiver_name = format!("it_award_recv_{}", suffix);
    seed_user(&pool, &giver, &format!("it_award_giver_{}", suffix)).await;
    seed_user(&pool, &receiver, &receiver_name).await;
    seed_allocation(&pool, &giver, BadgeTier::Gold, 2).await;

    let template_id = create_template(
        &pool,
        &giver,
        &format!("gold-{}", suffix),
        Some(BadgeTier::Gold),
    )
    .await;

    let awarded = award_service(&pool)
        .give_badge(
            &giver,
            template_id,
            // 用户名解析大小写不敏感
            &receiver_name.to_uppercase(),
            BadgeCustomizations::default(),
        )
        .await
        .unwrap();

    assert_eq!(awarded.instance.receiver_id, receiver);
    assert!(!awarded.instance.api_visible);

    // 配额扣减
    let remaining: i32 = sqlx::query_scalar(
        "SELECT remaining FROM user_badge_allocations WHERE user_id = $1 AND tier = 'GOLD'",
    )
    .bind(&giver)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 1);

    // 通知与实例同事务写入
    let notification_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND source_id = $2",
    )
    .bind(&receiver)
    .bind(awarded.instance.id.to_string())
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(notification_count, 1);
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_give_badge_fails_when_allocation_exhausted() {
    let pool = setup_pool().await;
    let suffix = unique_suffix();
    let giver = format!("it-exhaust-giver-{}", suffix);
    let receiver = format!("it-exhaust-recv-{}", suffix);
    let receiver_name = format!("it_exhaust_recv_{}", suffix);
    seed_user(&pool, &giver, &format!("it_exhaust_giver_{}", suffix)).await;
    seed_user(&pool, &receiver, &receiver_name).await;
    seed_allocation(&pool, &giver, BadgeTier::Silver, 0).await;

    let template_id = create_template(
        &pool,
        &giver,
        &format!("silver-{}", suffix),
        Some(BadgeTier::Silver),
    )
    .await;

    let err = award_service(&pool)
        .give_badge(
            &giver,
            template_id,
            &receiver_name,
            BadgeCustomizations::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BadgeError::InsufficientAllocation {
            tier: BadgeTier::Silver
        }
    ));

    // 失败不应留下实例行
    let instance_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM badge_instances WHERE template_id = $1")
            .bind(template_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(instance_count, 0);
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_only_template_owner_may_give() {
    let pool = setup_pool().await;
    let suffix = unique_suffix();
    let owner = format!("it-owner-{}", suffix);
    let outsider = format!("it-outsider-{}", suffix);
    let receiver_name = format!("it_owner_recv_{}", suffix);
    seed_user(&pool, &owner, &format!("it_owner_{}", suffix)).await;
    seed_user(&pool, &outsider, &format!("it_outsider_{}", suffix)).await;
    seed_user(&pool, &format!("it-owner-recv-{}", suffix), &receiver_name).await;

    let template_id = create_template(&pool, &owner, &format!("owned-{}", suffix), None).await;

    let err = award_service(&pool)
        .give_badge(
            &outsider,
            template_id,
            &receiver_name,
            BadgeCustomizations::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BadgeError::NotTemplateOwner(_)));
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_bulk_give_reports_partial_failure() {
    let pool = setup_pool().await;
    let suffix = unique_suffix();
    let giver = format!("it-bulk-giver-{}", suffix);
    seed_user(&pool, &giver, &format!("it_bulk_giver_{}", suffix)).await;

    let alice = format!("it_bulk_alice_{}", suffix);
    let carol = format!("it_bulk_carol_{}", suffix);
    seed_user(&pool, &format!("it-bulk-alice-{}", suffix), &alice).await;
    seed_user(&pool, &format!("it-bulk-carol-{}", suffix), &carol).await;

    let template_id = create_template(&pool, &giver, &format!("bulk-{}", suffix), None).await;

    let ghost = format!("it_bulk_ghost_{}", suffix);
    let recipients = vec![
        BulkRecipient {
            username: alice.clone(),
            customizations: BadgeCustomizations::default(),
        },
        BulkRecipient {
            username: ghost.clone(),
            customizations: BadgeCustomizations::default(),
        },
        BulkRecipient {
            username: carol.clone(),
            customizations: BadgeCustomizations::default(),
        },
    ];

    let result = award_service(&pool)
        .give_badges_bulk(&giver, template_id, recipients)
        .await
        .unwrap();

    // 第二个接收者不存在，其余两个正常授予
    assert_eq!(result.successful.len(), 2);
    assert_eq!(result.successful[0].username, alice);
    assert_eq!(result.successful[1].username, carol);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].username, ghost);
    assert_eq!(result.failed[0].error_code, "USER_NOT_FOUND");
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_tier_border_wins_in_resolved_listing() {
    let pool = setup_pool().await;
    let suffix = unique_suffix();
    let giver = format!("it-tier-giver-{}", suffix);
    let receiver = format!("it-tier-recv-{}", suffix);
    let receiver_name = format!("it_tier_recv_{}", suffix);
    seed_user(&pool, &giver, &format!("it_tier_giver_{}", suffix)).await;
    seed_user(&pool, &receiver, &receiver_name).await;
    seed_allocation(&pool, &giver, BadgeTier::Gold, 5).await;

    let template_id = create_template(
        &pool,
        &giver,
        &format!("tier-{}", suffix),
        Some(BadgeTier::Gold),
    )
    .await;

    // 覆盖黑色边框也挡不住金色
    let customizations = BadgeCustomizations {
        override_border_config: Some(badge_service::VisualConfig::simple_color("#000000")),
        ..Default::default()
    };
    award_service(&pool)
        .give_badge(&giver, template_id, &receiver_name, customizations)
        .await
        .unwrap();

    let received = query_service(&pool)
        .list_received(&receiver_name)
        .await
        .unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].border_color, "#FFD700");
    assert_eq!(received[0].tier, Some(BadgeTier::Gold));
}
