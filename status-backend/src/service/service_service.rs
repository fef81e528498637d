// status-backend/src/service/service_service.rs

use crate::api::dto::service_dto::{
    CreateServiceDto, ServiceResponse, UpdateServiceDto, UpdateServiceStatusDto,
};
use crate::db::DbPool;
use crate::domain::service_model;
use crate::domain::service_status::ServiceStatus;
use crate::error::{AppError, AppResult};
use crate::repository::service_repository::ServiceRepository;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// サービス（監視対象コンポーネント）のCRUD
pub struct ServiceService {
    service_repository: ServiceRepository,
}

impl ServiceService {
    pub fn new(db: DbPool) -> Self {
        Self {
            service_repository: ServiceRepository::new(db),
        }
    }

    pub async fn create_service(
        &self,
        dto: CreateServiceDto,
        organization_id: Uuid,
    ) -> AppResult<ServiceResponse> {
        dto.validate()?;

        let status = match dto.status.as_deref() {
            Some(value) => Self::parse_status(value)?,
            None => ServiceStatus::default(),
        };

        let now = Utc::now();
        let service = service_model::Model {
            id: Uuid::new_v4(),
            organization_id,
            name: dto.name,
            description: dto.description,
            status: status.as_str().to_string(),
            uptime_percentage: dto.uptime_percentage.unwrap_or(99.9),
            created_at: now,
            updated_at: now,
        };

        let created = self.service_repository.create(&service).await?;

        info!(
            service_id = %created.id,
            organization_id = %organization_id,
            "Service created"
        );

        Ok(ServiceResponse::from(created))
    }

    pub async fn get_service(
        &self,
        service_id: Uuid,
        organization_id: Uuid,
    ) -> AppResult<ServiceResponse> {
        self.service_repository
            .find_by_id_in_org(service_id, organization_id)
            .await?
            .map(ServiceResponse::from)
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))
    }

    pub async fn list_services(&self, organization_id: Uuid) -> AppResult<Vec<ServiceResponse>> {
        let services = self
            .service_repository
            .find_by_organization_id(organization_id)
            .await?;
        Ok(services.into_iter().map(ServiceResponse::from).collect())
    }

    /// サービスを部分更新する（渡されたフィールドだけを適用）
    pub async fn update_service(
        &self,
        service_id: Uuid,
        dto: UpdateServiceDto,
        organization_id: Uuid,
    ) -> AppResult<ServiceResponse> {
        dto.validate()?;

        let mut service = self
            .service_repository
            .find_by_id_in_org(service_id, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        if dto.name.is_none()
            && dto.description.is_none()
            && dto.status.is_none()
            && dto.uptime_percentage.is_none()
        {
            return Ok(ServiceResponse::from(service));
        }

        if let Some(name) = dto.name {
            service.name = name;
        }
        if let Some(description) = dto.description {
            service.description = Some(description);
        }
        if let Some(status) = dto.status {
            service.status = Self::parse_status(&status)?.as_str().to_string();
        }
        if let Some(uptime) = dto.uptime_percentage {
            service.uptime_percentage = uptime;
        }
        service.updated_at = Utc::now();

        let updated = self.service_repository.update(&service).await?;
        Ok(ServiceResponse::from(updated))
    }

    /// サービスステータスの手動上書き
    ///
    /// maintenance を含む任意のステータスを直接設定できる。インシデント起因の
    /// 次の再計算で上書きされ得る点は仕様どおり。
    pub async fn update_service_status(
        &self,
        service_id: Uuid,
        dto: UpdateServiceStatusDto,
        organization_id: Uuid,
    ) -> AppResult<ServiceResponse> {
        let status = Self::parse_status(&dto.status)?;

        let service = self
            .service_repository
            .find_by_id_in_org(service_id, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        info!(
            service_id = %service.id,
            old_status = %service.status,
            new_status = %status,
            "Service status manually overridden"
        );

        let updated = self
            .service_repository
            .update_status(service.id, status.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        Ok(ServiceResponse::from(updated))
    }

    /// サービスを削除する（外部キーのカスケードで配下のインシデントも消える）
    pub async fn delete_service(
        &self,
        service_id: Uuid,
        organization_id: Uuid,
    ) -> AppResult<()> {
        let service = self
            .service_repository
            .find_by_id_in_org(service_id, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        self.service_repository.delete_by_id(service.id).await?;

        info!(
            service_id = %service.id,
            organization_id = %organization_id,
            "Service deleted"
        );

        Ok(())
    }

    fn parse_status(value: &str) -> AppResult<ServiceStatus> {
        value
            .parse::<ServiceStatus>()
            .map_err(AppError::ValidationError)
    }
}
