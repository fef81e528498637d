// status-backend/src/api/dto/incident_dto.rs
use crate::domain::incident_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateIncidentDto {
    pub service_id: Uuid,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Incident title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(
        max = 5000,
        message = "Incident description must not exceed 5000 characters"
    ))]
    pub description: String,

    // low / medium / high / critical のいずれか（サービス層で検証）
    pub impact: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct UpdateIncidentDto {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Incident title must be between 1 and 200 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(
        max = 5000,
        message = "Incident description must not exceed 5000 characters"
    ))]
    pub description: Option<String>,

    pub status: Option<String>,
    pub impact: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateIncidentStatusDto {
    pub status: String,

    // 指定された場合、説明欄の末尾にタイムスタンプ付きで追記される
    #[validate(length(
        max = 2000,
        message = "Update message must not exceed 2000 characters"
    ))]
    pub update_message: Option<String>,
}

// --- Response DTOs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
    pub impact: String,
    pub created_by: Uuid,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<incident_model::Model> for IncidentResponse {
    fn from(model: incident_model::Model) -> Self {
        Self {
            id: model.id,
            service_id: model.service_id,
            title: model.title,
            description: model.description,
            status: model.status,
            impact: model.impact,
            created_by: model.created_by,
            resolved_at: model.resolved_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentStatsResponse {
    pub total_incidents: u64,
    pub active_incidents: u64,
    pub resolved_incidents: u64,
    pub critical_active: u64,
}
