// tests/incident_lifecycle_tests.rs
//
// インシデントの作成・更新・削除と、その副作用（resolved_at の扱い、
// 再計算のトリガー条件、統計）の結合テスト。

mod common;

use common::db::TestDatabase;
use common::test_data;
use status_backend::api::dto::incident_dto::{
    UpdateIncidentDto, UpdateIncidentStatusDto,
};
use status_backend::api::dto::service_dto::UpdateServiceStatusDto;
use status_backend::error::AppError;
use status_backend::service::incident_service::IncidentService;
use status_backend::service::service_service::ServiceService;
use status_backend::service::status_service::StatusService;
use std::sync::Arc;
use uuid::Uuid;

fn build_services(db: &TestDatabase) -> (IncidentService, ServiceService) {
    let status_service = Arc::new(StatusService::new(db.connection.clone()));
    (
        IncidentService::new(db.connection.clone(), status_service),
        ServiceService::new(db.connection.clone()),
    )
}

#[tokio::test]
async fn test_create_incident_rejects_service_outside_organization() {
    let db = TestDatabase::new().await;
    let (incident_service, _) = build_services(&db);

    let org_a = test_data::seed_organization(&db.connection, "org-a").await;
    let org_b = test_data::seed_organization(&db.connection, "org-b").await;
    let foreign_service = test_data::seed_service(&db.connection, org_a.id, "API").await;

    // org-b の操作者が org-a のサービスを指定する
    let result = incident_service
        .create_incident(
            test_data::create_incident_dto(foreign_service.id, "Nope", "high"),
            Uuid::new_v4(),
            org_b.id,
        )
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));

    // 何も書き込まれていないこと
    let stats = incident_service
        .get_incident_statistics(org_a.id)
        .await
        .unwrap();
    assert_eq!(stats.total_incidents, 0);
}

#[tokio::test]
async fn test_create_incident_starts_investigating() {
    let db = TestDatabase::new().await;
    let (incident_service, _) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;
    let service = test_data::seed_service(&db.connection, org.id, "API").await;

    let incident = incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "API down", "critical"),
            Uuid::new_v4(),
            org.id,
        )
        .await
        .unwrap();

    assert_eq!(incident.status, "investigating");
    assert_eq!(incident.impact, "critical");
    assert!(incident.resolved_at.is_none());
}

#[tokio::test]
async fn test_create_incident_rejects_invalid_impact() {
    let db = TestDatabase::new().await;
    let (incident_service, _) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;
    let service = test_data::seed_service(&db.connection, org.id, "API").await;

    let result = incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "API down", "catastrophic"),
            Uuid::new_v4(),
            org.id,
        )
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_resolved_at_set_and_cleared_on_status_change() {
    let db = TestDatabase::new().await;
    let (incident_service, _) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;
    let service = test_data::seed_service(&db.connection, org.id, "API").await;

    let incident = incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "API down", "high"),
            Uuid::new_v4(),
            org.id,
        )
        .await
        .unwrap();

    let resolved = incident_service
        .update_incident_status(
            incident.id,
            UpdateIncidentStatusDto {
                status: "resolved".to_string(),
                update_message: None,
            },
            org.id,
        )
        .await
        .unwrap();
    assert_eq!(resolved.status, "resolved");
    assert!(resolved.resolved_at.is_some());

    // resolved から差し戻すと resolved_at は消える（遷移は自由）
    let reopened = incident_service
        .update_incident_status(
            incident.id,
            UpdateIncidentStatusDto {
                status: "monitoring".to_string(),
                update_message: None,
            },
            org.id,
        )
        .await
        .unwrap();
    assert_eq!(reopened.status, "monitoring");
    assert!(reopened.resolved_at.is_none());
}

#[tokio::test]
async fn test_title_only_update_does_not_trigger_recalculation() {
    let db = TestDatabase::new().await;
    let (incident_service, service_service) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;
    let service = test_data::seed_service(&db.connection, org.id, "API").await;

    let incident = incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "API down", "critical"),
            Uuid::new_v4(),
            org.id,
        )
        .await
        .unwrap();

    // 手動でステータスをずらして、再計算が走ったかどうかの目印にする
    service_service
        .update_service_status(
            service.id,
            UpdateServiceStatusDto {
                status: "operational".to_string(),
            },
            org.id,
        )
        .await
        .unwrap();

    incident_service
        .update_incident(
            incident.id,
            UpdateIncidentDto {
                title: Some("API completely down".to_string()),
                ..Default::default()
            },
            org.id,
        )
        .await
        .unwrap();

    // タイトルだけの編集では再計算されない
    let fetched = service_service.get_service(service.id, org.id).await.unwrap();
    assert_eq!(fetched.status, "operational");

    // 影響度の変更は再計算を引き起こす
    incident_service
        .update_incident(
            incident.id,
            UpdateIncidentDto {
                impact: Some("high".to_string()),
                ..Default::default()
            },
            org.id,
        )
        .await
        .unwrap();

    let fetched = service_service.get_service(service.id, org.id).await.unwrap();
    assert_eq!(fetched.status, "partial_outage");
}

#[tokio::test]
async fn test_status_update_appends_timestamped_message() {
    let db = TestDatabase::new().await;
    let (incident_service, _) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;
    let service = test_data::seed_service(&db.connection, org.id, "API").await;

    let incident = incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "API down", "high"),
            Uuid::new_v4(),
            org.id,
        )
        .await
        .unwrap();
    let original_description = incident.description.clone();

    let updated = incident_service
        .update_incident_status(
            incident.id,
            UpdateIncidentStatusDto {
                status: "identified".to_string(),
                update_message: Some("Root cause found".to_string()),
            },
            org.id,
        )
        .await
        .unwrap();

    assert!(updated.description.starts_with(&original_description));
    assert!(updated.description.contains("**Update ("));
    assert!(updated.description.contains("Root cause found"));

    // さらに追記しても前のメッセージは残る
    let updated = incident_service
        .update_incident_status(
            incident.id,
            UpdateIncidentStatusDto {
                status: "monitoring".to_string(),
                update_message: Some("Fix deployed".to_string()),
            },
            org.id,
        )
        .await
        .unwrap();

    assert!(updated.description.contains("Root cause found"));
    assert!(updated.description.contains("Fix deployed"));
}

#[tokio::test]
async fn test_delete_last_active_incident_restores_operational() {
    let db = TestDatabase::new().await;
    let (incident_service, service_service) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;
    let service = test_data::seed_service(&db.connection, org.id, "API").await;

    let incident = incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "API down", "critical"),
            Uuid::new_v4(),
            org.id,
        )
        .await
        .unwrap();

    let fetched = service_service.get_service(service.id, org.id).await.unwrap();
    assert_eq!(fetched.status, "major_outage");

    incident_service.delete_incident(incident.id, org.id).await.unwrap();

    let fetched = service_service.get_service(service.id, org.id).await.unwrap();
    assert_eq!(fetched.status, "operational");
}

#[tokio::test]
async fn test_update_missing_incident_returns_not_found() {
    let db = TestDatabase::new().await;
    let (incident_service, _) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;

    let result = incident_service
        .update_incident(
            Uuid::new_v4(),
            UpdateIncidentDto {
                title: Some("ghost".to_string()),
                ..Default::default()
            },
            org.id,
        )
        .await;

    assert!(matches!(result, Err(ref e) if e.is_not_found()));
}

#[tokio::test]
async fn test_incident_statistics_partition() {
    let db = TestDatabase::new().await;
    let (incident_service, _) = build_services(&db);

    let org = test_data::seed_organization(&db.connection, "acme").await;
    let service = test_data::seed_service(&db.connection, org.id, "API").await;
    let actor = Uuid::new_v4();

    incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "Critical one", "critical"),
            actor,
            org.id,
        )
        .await
        .unwrap();
    incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "Medium one", "medium"),
            actor,
            org.id,
        )
        .await
        .unwrap();
    let to_resolve = incident_service
        .create_incident(
            test_data::create_incident_dto(service.id, "Low one", "low"),
            actor,
            org.id,
        )
        .await
        .unwrap();

    incident_service
        .update_incident_status(
            to_resolve.id,
            UpdateIncidentStatusDto {
                status: "resolved".to_string(),
                update_message: None,
            },
            org.id,
        )
        .await
        .unwrap();

    let stats = incident_service.get_incident_statistics(org.id).await.unwrap();
    assert_eq!(stats.total_incidents, 3);
    assert_eq!(stats.active_incidents, 2);
    assert_eq!(stats.resolved_incidents, 1);
    assert_eq!(stats.critical_active, 1);
}
