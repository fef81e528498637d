// status-backend/src/api/dto/service_dto.rs
use crate::domain::service_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateServiceDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Service name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(
        max = 2000,
        message = "Service description must not exceed 2000 characters"
    ))]
    pub description: Option<String>,

    pub status: Option<String>, // 省略時は operational

    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Uptime percentage must be between 0 and 100"
    ))]
    pub uptime_percentage: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct UpdateServiceDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Service name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(
        max = 2000,
        message = "Service description must not exceed 2000 characters"
    ))]
    pub description: Option<String>,

    pub status: Option<String>,

    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Uptime percentage must be between 0 and 100"
    ))]
    pub uptime_percentage: Option<f64>,
}

/// ステータスの手動上書き用（maintenance もここからのみ設定できる）
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateServiceStatusDto {
    pub status: String,
}

// --- Response DTOs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub uptime_percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<service_model::Model> for ServiceResponse {
    fn from(model: service_model::Model) -> Self {
        Self {
            id: model.id,
            organization_id: model.organization_id,
            name: model.name,
            description: model.description,
            status: model.status,
            uptime_percentage: model.uptime_percentage,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
