// status-backend/src/service/incident_service.rs

use crate::api::dto::incident_dto::{
    CreateIncidentDto, IncidentResponse, IncidentStatsResponse, UpdateIncidentDto,
    UpdateIncidentStatusDto,
};
use crate::db::DbPool;
use crate::domain::incident_impact::IncidentImpact;
use crate::domain::incident_model;
use crate::domain::incident_status::IncidentStatus;
use crate::error::{AppError, AppResult};
use crate::repository::incident_repository::IncidentRepository;
use crate::repository::service_repository::ServiceRepository;
use crate::service::status_service::StatusService;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// インシデントのライフサイクルを司るサービス
///
/// 導出ステータスに影響し得る変更（作成・影響度/状況の変更・削除）は、
/// 永続化の後に必ず対象サービスの再計算を呼ぶ。
pub struct IncidentService {
    incident_repository: IncidentRepository,
    service_repository: ServiceRepository,
    status_service: Arc<StatusService>,
}

impl IncidentService {
    pub fn new(db: DbPool, status_service: Arc<StatusService>) -> Self {
        Self {
            incident_repository: IncidentRepository::new(db.clone()),
            service_repository: ServiceRepository::new(db),
            status_service,
        }
    }

    /// インシデントを作成する
    ///
    /// 対象サービスが操作者の組織に属していなければ ValidationError で、
    /// 何も書き込まない。作成後はサービスステータスを再計算する。
    pub async fn create_incident(
        &self,
        dto: CreateIncidentDto,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> AppResult<IncidentResponse> {
        dto.validate()?;

        let impact = Self::parse_impact(&dto.impact)?;

        // 他組織のサービスに対するインシデント作成は拒否
        let service = self
            .service_repository
            .find_by_id_in_org(dto.service_id, organization_id)
            .await?;
        if service.is_none() {
            return Err(AppError::ValidationError(format!(
                "Service {} does not belong to your organization",
                dto.service_id
            )));
        }

        let now = Utc::now();
        let incident = incident_model::Model {
            id: Uuid::new_v4(),
            service_id: dto.service_id,
            title: dto.title,
            description: dto.description,
            status: IncidentStatus::Investigating.as_str().to_string(),
            impact: impact.as_str().to_string(),
            created_by: user_id,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.incident_repository.create(&incident).await?;

        info!(
            incident_id = %created.id,
            service_id = %created.service_id,
            impact = %created.impact,
            "Incident created"
        );

        // 新しいアクティブインシデントを反映する
        self.status_service
            .recalculate_service_status(created.service_id)
            .await?;

        Ok(IncidentResponse::from(created))
    }

    /// インシデントを部分更新する
    ///
    /// 渡されたフィールドだけを適用する。影響度か状況が変わった場合のみ
    /// サービスステータスを再計算する（タイトルや説明だけの編集では走らない）。
    pub async fn update_incident(
        &self,
        incident_id: Uuid,
        dto: UpdateIncidentDto,
        organization_id: Uuid,
    ) -> AppResult<IncidentResponse> {
        dto.validate()?;

        let mut incident = self
            .incident_repository
            .find_by_id_in_org(incident_id, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".to_string()))?;

        if dto.title.is_none()
            && dto.description.is_none()
            && dto.status.is_none()
            && dto.impact.is_none()
        {
            return Ok(IncidentResponse::from(incident));
        }

        let old_impact = incident.impact.clone();
        let status_supplied = dto.status.is_some();

        if let Some(title) = dto.title {
            incident.title = title;
        }
        if let Some(description) = dto.description {
            incident.description = description;
        }
        if let Some(impact) = dto.impact {
            incident.impact = Self::parse_impact(&impact)?.as_str().to_string();
        }
        if let Some(status) = dto.status {
            let status = Self::parse_status(&status)?;
            incident.status = status.as_str().to_string();

            // resolved_at は status == resolved のときだけ Some
            if status.is_resolved() {
                incident.resolved_at = Some(Utc::now());
            } else if incident.resolved_at.is_some() {
                incident.resolved_at = None;
            }
        }
        incident.updated_at = Utc::now();

        let updated = self.incident_repository.update(&incident).await?;

        // 影響度が変わったか、状況の変更が要求された場合のみ再計算
        if old_impact != updated.impact || status_supplied {
            self.status_service
                .recalculate_service_status(updated.service_id)
                .await?;
        }

        Ok(IncidentResponse::from(updated))
    }

    /// 状況だけを更新し、必要ならメッセージを履歴として残す
    ///
    /// メッセージは説明欄の末尾にタイムスタンプ付きで追記される（上書きしない）。
    /// このパスでは常に再計算が走る。
    pub async fn update_incident_status(
        &self,
        incident_id: Uuid,
        dto: UpdateIncidentStatusDto,
        organization_id: Uuid,
    ) -> AppResult<IncidentResponse> {
        dto.validate()?;

        let status = Self::parse_status(&dto.status)?;

        let mut incident = self
            .incident_repository
            .find_by_id_in_org(incident_id, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".to_string()))?;

        let now = Utc::now();
        incident.status = status.as_str().to_string();

        if status.is_resolved() {
            incident.resolved_at = Some(now);
        } else if incident.resolved_at.is_some() {
            // resolved から差し戻されたら解決時刻は消す
            incident.resolved_at = None;
        }

        if let Some(message) = dto.update_message.as_deref() {
            if !message.is_empty() {
                let timestamp = now.format("%Y-%m-%d %H:%M:%S UTC");
                incident
                    .description
                    .push_str(&format!("\n\n**Update ({}):** {}", timestamp, message));
            }
        }
        incident.updated_at = now;

        let updated = self.incident_repository.update(&incident).await?;

        info!(
            incident_id = %updated.id,
            service_id = %updated.service_id,
            status = %updated.status,
            "Incident status updated"
        );

        self.status_service
            .recalculate_service_status(updated.service_id)
            .await?;

        Ok(IncidentResponse::from(updated))
    }

    /// インシデントを削除する
    ///
    /// アクティブ集合が縮むため、削除後は必ず元サービスを再計算する
    /// （最後の1件だったサービスは operational に戻る）。
    pub async fn delete_incident(
        &self,
        incident_id: Uuid,
        organization_id: Uuid,
    ) -> AppResult<()> {
        let incident = self
            .incident_repository
            .find_by_id_in_org(incident_id, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".to_string()))?;

        let service_id = incident.service_id;
        self.incident_repository.delete_by_id(incident.id).await?;

        info!(
            incident_id = %incident.id,
            service_id = %service_id,
            "Incident deleted"
        );

        self.status_service
            .recalculate_service_status(service_id)
            .await?;

        Ok(())
    }

    pub async fn get_incident(
        &self,
        incident_id: Uuid,
        organization_id: Uuid,
    ) -> AppResult<IncidentResponse> {
        self.incident_repository
            .find_by_id_in_org(incident_id, organization_id)
            .await?
            .map(IncidentResponse::from)
            .ok_or_else(|| AppError::NotFound("Incident not found".to_string()))
    }

    /// 組織のインシデント一覧（作成日の新しい順）
    pub async fn list_incidents_by_organization(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<IncidentResponse>> {
        let incidents = self
            .incident_repository
            .find_by_organization_id(organization_id)
            .await?;
        Ok(incidents.into_iter().map(IncidentResponse::from).collect())
    }

    /// サービスのインシデント一覧（作成日の新しい順）
    pub async fn list_incidents_by_service(
        &self,
        service_id: Uuid,
        organization_id: Uuid,
    ) -> AppResult<Vec<IncidentResponse>> {
        // 他組織のサービスのインシデントは見せない
        self.service_repository
            .find_by_id_in_org(service_id, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        let incidents = self.incident_repository.find_by_service_id(service_id).await?;
        Ok(incidents.into_iter().map(IncidentResponse::from).collect())
    }

    /// 組織のアクティブインシデント一覧（作成日の新しい順）
    pub async fn list_active_incidents_by_organization(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<IncidentResponse>> {
        let incidents = self
            .incident_repository
            .find_active_by_organization_id(organization_id)
            .await?;
        Ok(incidents.into_iter().map(IncidentResponse::from).collect())
    }

    /// 組織のインシデント統計（読み取りのみ）
    pub async fn get_incident_statistics(
        &self,
        organization_id: Uuid,
    ) -> AppResult<IncidentStatsResponse> {
        let total = self
            .incident_repository
            .count_by_organization(organization_id)
            .await?;
        let active = self
            .incident_repository
            .count_active_by_organization(organization_id)
            .await?;
        let critical_active = self
            .incident_repository
            .count_critical_active_by_organization(organization_id)
            .await?;

        Ok(IncidentStatsResponse {
            total_incidents: total,
            active_incidents: active,
            resolved_incidents: total - active,
            critical_active,
        })
    }

    fn parse_impact(value: &str) -> AppResult<IncidentImpact> {
        value
            .parse::<IncidentImpact>()
            .map_err(AppError::ValidationError)
    }

    fn parse_status(value: &str) -> AppResult<IncidentStatus> {
        value
            .parse::<IncidentStatus>()
            .map_err(AppError::ValidationError)
    }
}
