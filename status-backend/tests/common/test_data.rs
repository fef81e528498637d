// tests/common/test_data.rs
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, Set};
use status_backend::api::dto::incident_dto::CreateIncidentDto;
use status_backend::db::DbPool;
use status_backend::domain::incident_impact::IncidentImpact;
use status_backend::domain::incident_model;
use status_backend::domain::incident_status::IncidentStatus;
use status_backend::domain::organization_model::{self, OrganizationStatus};
use status_backend::domain::service_model;
use status_backend::domain::service_status::ServiceStatus;
use uuid::Uuid;

pub async fn seed_organization(db: &DbPool, name: &str) -> organization_model::Model {
    seed_organization_with_status(db, name, OrganizationStatus::Active).await
}

pub async fn seed_organization_with_status(
    db: &DbPool,
    name: &str,
    status: OrganizationStatus,
) -> organization_model::Model {
    organization_model::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(Some("Test organization".to_string())),
        website: Set(Some("https://status.example.com".to_string())),
        status: Set(status.as_str().to_string()),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("insert organization")
}

pub async fn seed_service(
    db: &DbPool,
    organization_id: Uuid,
    name: &str,
) -> service_model::Model {
    service_model::ActiveModel {
        id: Set(Uuid::new_v4()),
        organization_id: Set(organization_id),
        name: Set(name.to_string()),
        description: Set(Some("Test service".to_string())),
        status: Set(ServiceStatus::Operational.as_str().to_string()),
        uptime_percentage: Set(99.9),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("insert service")
}

/// 作成日時と解決日時を明示して挿入する（時間ウィンドウ系のテスト用）
pub async fn seed_incident_at(
    db: &DbPool,
    service_id: Uuid,
    impact: IncidentImpact,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
) -> incident_model::Model {
    let status = if resolved_at.is_some() {
        IncidentStatus::Resolved
    } else {
        IncidentStatus::Investigating
    };

    incident_model::ActiveModel {
        id: Set(Uuid::new_v4()),
        service_id: Set(service_id),
        title: Set("Seeded incident".to_string()),
        description: Set("Seeded incident description".to_string()),
        status: Set(status.as_str().to_string()),
        impact: Set(impact.as_str().to_string()),
        created_by: Set(Uuid::new_v4()),
        resolved_at: Set(resolved_at),
        created_at: Set(created_at),
        updated_at: Set(resolved_at.unwrap_or(created_at)),
    }
    .insert(db)
    .await
    .expect("insert incident")
}

pub fn create_incident_dto(service_id: Uuid, title: &str, impact: &str) -> CreateIncidentDto {
    CreateIncidentDto {
        service_id,
        title: title.to_string(),
        description: "Something is broken".to_string(),
        impact: impact.to_string(),
    }
}
