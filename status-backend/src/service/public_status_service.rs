// status-backend/src/service/public_status_service.rs

use crate::api::dto::public_status_dto::{
    ImpactLegend, IncidentBlock, LegendEntry, OrganizationDirectoryEntry, OrganizationSummary,
    PublicIncidentEntry, PublicServiceEntry, ServiceTimeline, StatusPageResponse,
    TimelineOrganizationSummary, TimelinePeriod, TimelineResponse, TimelineServiceSummary,
    TimelineSummary,
};
use crate::db::DbPool;
use crate::domain::incident_impact::IncidentImpact;
use crate::domain::incident_model;
use crate::error::AppResult;
use crate::repository::incident_repository::IncidentRepository;
use crate::repository::organization_repository::OrganizationRepository;
use crate::repository::service_repository::ServiceRepository;
use crate::service::status_service::StatusService;
use chrono::{DateTime, Duration, Utc};
use sea_orm::Order;

/// 公開ステータスページのデフォルト表示期間（日数）
pub const DEFAULT_TIMELINE_DAYS: i64 = 30;

/// 影響度が壊れている行に使う予備色（グレー）
const FALLBACK_COLOR: &str = "#6b7280";

/// 公開ステータスページ・ディレクトリ・タイムラインの読み取り系サービス
///
/// すべて読み取り専用。組織が見つからない場合は Ok(None) を返す
/// （未知の組織名での照会は日常的に起こるため、エラーにしない）。
pub struct PublicStatusService {
    organization_repository: OrganizationRepository,
    service_repository: ServiceRepository,
    incident_repository: IncidentRepository,
}

impl PublicStatusService {
    pub fn new(db: DbPool) -> Self {
        Self {
            organization_repository: OrganizationRepository::new(db.clone()),
            service_repository: ServiceRepository::new(db.clone()),
            incident_repository: IncidentRepository::new(db),
        }
    }

    /// 組織の公開ステータスページを組み立てる
    ///
    /// identifier は組織IDでも組織名でもよい。
    pub async fn get_status_page(
        &self,
        org_identifier: &str,
    ) -> AppResult<Option<StatusPageResponse>> {
        let organization = match self
            .organization_repository
            .find_by_id_or_name(org_identifier)
            .await?
        {
            Some(organization) => organization,
            None => return Ok(None),
        };

        let now = Utc::now();
        let services = self
            .service_repository
            .find_by_organization_id(organization.id)
            .await?;

        let since = now - Duration::days(DEFAULT_TIMELINE_DAYS);
        let recent_incidents = self
            .incident_repository
            .find_by_organization_since(organization.id, since, Order::Desc)
            .await?;

        let overall_status =
            StatusService::aggregate_statuses(services.iter().map(|s| s.status.as_str()));

        let services = services
            .into_iter()
            .map(|service| PublicServiceEntry {
                id: service.id,
                name: service.name,
                description: service.description.unwrap_or_default(),
                status: service.status,
                uptime_percentage: service.uptime_percentage,
            })
            .collect();

        let incidents = recent_incidents
            .into_iter()
            .map(|incident| PublicIncidentEntry {
                id: incident.id,
                title: incident.title,
                description: incident.description,
                status: incident.status,
                impact: incident.impact,
                created_at: incident.created_at,
                updated_at: incident.updated_at,
                resolved_at: incident.resolved_at,
            })
            .collect();

        Ok(Some(StatusPageResponse {
            organization: OrganizationSummary {
                id: organization.id,
                name: organization.name,
                description: organization.description,
                website: organization.website,
            },
            overall_status,
            services,
            incidents,
            last_updated: now,
        }))
    }

    /// 公開ディレクトリ（active / trial の組織一覧と全体ステータス）
    pub async fn list_public_organizations(
        &self,
    ) -> AppResult<Vec<OrganizationDirectoryEntry>> {
        let organizations = self.organization_repository.find_publicly_listed().await?;

        let mut entries = Vec::with_capacity(organizations.len());
        for organization in organizations {
            let services = self
                .service_repository
                .find_by_organization_id(organization.id)
                .await?;
            let overall_status =
                StatusService::aggregate_statuses(services.iter().map(|s| s.status.as_str()));

            entries.push(OrganizationDirectoryEntry {
                id: organization.id,
                name: organization.name,
                description: organization.description,
                website: organization.website,
                status: overall_status,
                service_count: services.len(),
            });
        }

        Ok(entries)
    }

    /// インシデントタイムライン（可視化用のブロック列と集計）を組み立てる
    ///
    /// ウィンドウは `created_at >= now - window_days`（下限を含む）。`now` は
    /// 呼び出しごとに一度だけ取得し、レポート内のすべての継続時間計算で使い回す。
    pub async fn build_timeline(
        &self,
        org_identifier: &str,
        window_days: i64,
    ) -> AppResult<Option<TimelineResponse>> {
        let organization = match self
            .organization_repository
            .find_by_id_or_name(org_identifier)
            .await?
        {
            Some(organization) => organization,
            None => return Ok(None),
        };

        let now = Utc::now();
        let start_date = now - Duration::days(window_days);

        let services = self
            .service_repository
            .find_by_organization_id(organization.id)
            .await?;
        let incidents = self
            .incident_repository
            .find_by_organization_since(organization.id, start_date, Order::Asc)
            .await?;

        let services_timeline = services
            .into_iter()
            .map(|service| {
                let blocks: Vec<IncidentBlock> = incidents
                    .iter()
                    .filter(|incident| incident.service_id == service.id)
                    .map(|incident| Self::build_incident_block(incident, now))
                    .collect();

                ServiceTimeline {
                    incident_count: blocks.len(),
                    service: TimelineServiceSummary {
                        id: service.id,
                        name: service.name,
                        description: service.description,
                        current_status: service.status,
                    },
                    incidents: blocks,
                }
            })
            .collect();

        let summary = Self::summarize_incidents(&incidents);

        Ok(Some(TimelineResponse {
            organization: TimelineOrganizationSummary {
                id: organization.id,
                name: organization.name,
            },
            timeline_period: TimelinePeriod {
                start_date,
                end_date: now,
                days: window_days,
            },
            services: services_timeline,
            summary,
            impact_legend: Self::impact_legend(),
            generated_at: now,
        }))
    }

    /// 1件のインシデントをタイムライン上のブロックに変換する
    fn build_incident_block(
        incident: &incident_model::Model,
        now: DateTime<Utc>,
    ) -> IncidentBlock {
        // 未解決のブロックはレポート生成時刻までを占める
        let end_time = incident.resolved_at.unwrap_or(now);
        let duration_hours =
            round_two(duration_in_hours(incident.created_at, end_time));

        let color = IncidentImpact::from_str(&incident.impact)
            .map(|impact| impact.hex_color())
            .unwrap_or(FALLBACK_COLOR);

        IncidentBlock {
            id: incident.id,
            title: incident.title.clone(),
            description: incident.description.clone(),
            impact: incident.impact.clone(),
            status: incident.status.clone(),
            color: color.to_string(),
            start_time: incident.created_at,
            end_time,
            duration_hours,
            is_ongoing: incident.resolved_at.is_none(),
        }
    }

    /// ウィンドウ内インシデントの組織横断集計
    ///
    /// 平均解決時間は resolved_at を持つものだけで計算する。未解決は分子にも
    /// 分母にも入れない。
    fn summarize_incidents(incidents: &[incident_model::Model]) -> TimelineSummary {
        let total_incidents = incidents.len();
        let critical_incidents = incidents
            .iter()
            .filter(|i| i.impact == IncidentImpact::Critical.as_str())
            .count();
        let high_incidents = incidents
            .iter()
            .filter(|i| i.impact == IncidentImpact::High.as_str())
            .count();
        let ongoing_incidents = incidents
            .iter()
            .filter(|i| i.resolved_at.is_none())
            .count();

        let resolution_hours: Vec<f64> = incidents
            .iter()
            .filter_map(|i| {
                i.resolved_at
                    .map(|resolved_at| duration_in_hours(i.created_at, resolved_at))
            })
            .collect();
        let average_resolution_hours = if resolution_hours.is_empty() {
            0.0
        } else {
            round_two(resolution_hours.iter().sum::<f64>() / resolution_hours.len() as f64)
        };

        TimelineSummary {
            total_incidents,
            critical_incidents,
            high_incidents,
            ongoing_incidents,
            average_resolution_hours,
        }
    }

    /// 影響度の凡例（全サービス共通の固定マッピング）
    fn impact_legend() -> ImpactLegend {
        ImpactLegend {
            critical: LegendEntry {
                color: IncidentImpact::Critical.hex_color().to_string(),
                label: IncidentImpact::Critical.display_name().to_string(),
            },
            high: LegendEntry {
                color: IncidentImpact::High.hex_color().to_string(),
                label: IncidentImpact::High.display_name().to_string(),
            },
            medium: LegendEntry {
                color: IncidentImpact::Medium.hex_color().to_string(),
                label: IncidentImpact::Medium.display_name().to_string(),
            },
            low: LegendEntry {
                color: IncidentImpact::Low.hex_color().to_string(),
                label: IncidentImpact::Low.display_name().to_string(),
            },
        }
    }
}

fn duration_in_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::incident_status::IncidentStatus;
    use uuid::Uuid;

    fn incident(
        impact: IncidentImpact,
        created_at: DateTime<Utc>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> incident_model::Model {
        let status = if resolved_at.is_some() {
            IncidentStatus::Resolved
        } else {
            IncidentStatus::Investigating
        };
        incident_model::Model {
            id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            title: "Incident".to_string(),
            description: "details".to_string(),
            status: status.as_str().to_string(),
            impact: impact.as_str().to_string(),
            created_by: Uuid::new_v4(),
            resolved_at,
            created_at,
            updated_at: resolved_at.unwrap_or(created_at),
        }
    }

    #[test]
    fn test_build_incident_block_resolved() {
        let now = Utc::now();
        let created = now - Duration::hours(5);
        let resolved = created + Duration::minutes(90);
        let model = incident(IncidentImpact::High, created, Some(resolved));

        let block = PublicStatusService::build_incident_block(&model, now);
        assert_eq!(block.start_time, created);
        assert_eq!(block.end_time, resolved);
        assert_eq!(block.duration_hours, 1.5);
        assert_eq!(block.color, "#ea580c");
        assert!(!block.is_ongoing);
    }

    #[test]
    fn test_build_incident_block_ongoing_uses_now() {
        let now = Utc::now();
        let created = now - Duration::hours(2);
        let model = incident(IncidentImpact::Critical, created, None);

        let block = PublicStatusService::build_incident_block(&model, now);
        assert_eq!(block.end_time, now);
        assert_eq!(block.duration_hours, 2.0);
        assert_eq!(block.color, "#dc2626");
        assert!(block.is_ongoing);
    }

    #[test]
    fn test_build_incident_block_unknown_impact_falls_back_to_gray() {
        let now = Utc::now();
        let mut model = incident(IncidentImpact::Low, now - Duration::hours(1), None);
        model.impact = "unknown".to_string();

        let block = PublicStatusService::build_incident_block(&model, now);
        assert_eq!(block.color, FALLBACK_COLOR);
    }

    #[test]
    fn test_summarize_excludes_ongoing_from_mean() {
        let now = Utc::now();
        let base = now - Duration::days(1);
        let incidents = vec![
            incident(
                IncidentImpact::High,
                base,
                Some(base + Duration::hours(2)),
            ),
            incident(
                IncidentImpact::Medium,
                base,
                Some(base + Duration::hours(4)),
            ),
            incident(IncidentImpact::Critical, base, None),
        ];

        let summary = PublicStatusService::summarize_incidents(&incidents);
        assert_eq!(summary.total_incidents, 3);
        assert_eq!(summary.critical_incidents, 1);
        assert_eq!(summary.high_incidents, 1);
        assert_eq!(summary.ongoing_incidents, 1);
        // 未解決を除いた (2h + 4h) / 2
        assert_eq!(summary.average_resolution_hours, 3.0);
    }

    #[test]
    fn test_summarize_empty_window_is_zeroed() {
        let summary = PublicStatusService::summarize_incidents(&[]);
        assert_eq!(summary.total_incidents, 0);
        assert_eq!(summary.critical_incidents, 0);
        assert_eq!(summary.high_incidents, 0);
        assert_eq!(summary.ongoing_incidents, 0);
        assert_eq!(summary.average_resolution_hours, 0.0);
    }
}
