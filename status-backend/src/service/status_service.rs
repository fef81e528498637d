// status-backend/src/service/status_service.rs

use crate::db::DbPool;
use crate::domain::incident_impact::IncidentImpact;
use crate::domain::incident_model;
use crate::domain::service_model;
use crate::domain::service_status::ServiceStatus;
use crate::error::AppResult;
use crate::repository::incident_repository::IncidentRepository;
use crate::repository::service_repository::ServiceRepository;
use tracing::{debug, info};
use uuid::Uuid;

/// 組織全体ステータスの優先順位（深刻な順）
///
/// IncidentImpact の深刻度順序とは別の表。maintenance は影響度から導出されない
/// ステータスなので、障害系より下・operational より上に明示的に置く。
/// 両者を一つの表にまとめてはいけない。
const ORG_STATUS_PRECEDENCE: [ServiceStatus; 5] = [
    ServiceStatus::MajorOutage,
    ServiceStatus::PartialOutage,
    ServiceStatus::Degraded,
    ServiceStatus::Maintenance,
    ServiceStatus::Operational,
];

/// サービス・組織ステータスの導出エンジン
///
/// Service.status はアクティブインシデントから導出した値のキャッシュで、
/// インシデントが変化するたびにここで再計算して書き戻す。
pub struct StatusService {
    service_repository: ServiceRepository,
    incident_repository: IncidentRepository,
}

impl StatusService {
    pub fn new(db: DbPool) -> Self {
        Self {
            service_repository: ServiceRepository::new(db.clone()),
            incident_repository: IncidentRepository::new(db),
        }
    }

    /// アクティブインシデントの集合からサービスステータスを導出する
    ///
    /// 純粋関数。最も深刻な影響度が勝つ。空集合なら operational。
    /// maintenance はこの関数からは決して返らない。
    pub fn map_status(active_incidents: &[incident_model::Model]) -> ServiceStatus {
        let max_impact = active_incidents
            .iter()
            .filter_map(|incident| IncidentImpact::from_str(&incident.impact))
            .max();

        match max_impact {
            None => ServiceStatus::Operational,
            Some(IncidentImpact::Critical) => ServiceStatus::MajorOutage,
            Some(IncidentImpact::High) => ServiceStatus::PartialOutage,
            Some(IncidentImpact::Medium) | Some(IncidentImpact::Low) => ServiceStatus::Degraded,
        }
    }

    /// 保存済みサービスステータスの集合を優先順位表で畳み込む
    pub fn aggregate_statuses<'a, I>(statuses: I) -> ServiceStatus
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: Vec<ServiceStatus> = statuses
            .into_iter()
            .filter_map(ServiceStatus::from_str)
            .collect();

        for candidate in ORG_STATUS_PRECEDENCE {
            if present.contains(&candidate) {
                return candidate;
            }
        }
        ServiceStatus::Operational
    }

    /// サービスのステータスを再導出して書き戻す
    ///
    /// サービスが存在しない場合は Ok(None)。並行する削除とぶつかった呼び出し元は
    /// これを no-op として扱う。導出結果が現在値と同じなら書き込まない
    /// （updated_at も動かさない）。
    pub async fn recalculate_service_status(
        &self,
        service_id: Uuid,
    ) -> AppResult<Option<service_model::Model>> {
        let service = match self.service_repository.find_by_id(service_id).await? {
            Some(service) => service,
            None => return Ok(None),
        };

        // 呼び出し元から渡された値は信用せず、実行時点のインシデント集合を読み直す
        let active_incidents = self
            .incident_repository
            .find_active_by_service_id(service_id)
            .await?;
        let new_status = Self::map_status(&active_incidents);

        if service.status == new_status.as_str() {
            debug!(
                service_id = %service_id,
                status = %new_status,
                "Service status unchanged, skipping write"
            );
            return Ok(Some(service));
        }

        info!(
            service_id = %service_id,
            old_status = %service.status,
            new_status = %new_status,
            active_incidents = active_incidents.len(),
            "Service status recalculated"
        );

        // 読み取り後に行が消えていた場合も no-op 扱い
        self.service_repository
            .update_status(service_id, new_status.as_str())
            .await
            .map_err(Into::into)
    }

    /// 組織配下の全サービスを再計算し、保存値が変わった件数を返す
    ///
    /// バッチ全体の原子性は保証しない。各サービスは独立に再計算され、
    /// 再計算と同じ値になっただけのサービスは数えない。
    pub async fn recalculate_all_for_organization(&self, organization_id: Uuid) -> AppResult<u64> {
        let services = self
            .service_repository
            .find_by_organization_id(organization_id)
            .await?;
        let mut changed_count = 0u64;

        for service in services {
            let old_status = service.status.clone();
            if let Some(updated) = self.recalculate_service_status(service.id).await? {
                if updated.status != old_status {
                    changed_count += 1;
                }
            }
        }

        info!(
            organization_id = %organization_id,
            changed_count = changed_count,
            "Recalculated all service statuses for organization"
        );

        Ok(changed_count)
    }

    /// 組織の全体ステータスを保存済みサービスステータスから集約する
    ///
    /// インシデントからの再導出はしない。鮮度は再計算エンジンが担保する。
    pub async fn organization_overall_status(
        &self,
        organization_id: Uuid,
    ) -> AppResult<ServiceStatus> {
        let services = self
            .service_repository
            .find_by_organization_id(organization_id)
            .await?;

        Ok(Self::aggregate_statuses(
            services.iter().map(|s| s.status.as_str()),
        ))
    }
}
