// status-backend/src/api/dto/public_status_dto.rs
//
// 公開ステータスページとタイムライン可視化のレスポンス構造。色などの
// 表示メタデータは計算時に埋め込まれ、受け手側で再計算しない。
use crate::domain::service_status::ServiceStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- 公開ステータスページ ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicServiceEntry {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub uptime_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicIncidentEntry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
    pub impact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPageResponse {
    pub organization: OrganizationSummary,
    pub overall_status: ServiceStatus,
    pub services: Vec<PublicServiceEntry>,
    pub incidents: Vec<PublicIncidentEntry>,
    pub last_updated: DateTime<Utc>,
}

// --- 公開ディレクトリ ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationDirectoryEntry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub status: ServiceStatus,
    pub service_count: usize,
}

// --- インシデントタイムライン ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOrganizationSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePeriod {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub days: i64,
}

/// タイムライン上の1インシデント分の帯
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentBlock {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub status: String,
    pub color: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub is_ongoing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineServiceSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub current_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTimeline {
    pub service: TimelineServiceSummary,
    pub incidents: Vec<IncidentBlock>,
    pub incident_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub total_incidents: usize,
    pub critical_incidents: usize,
    pub high_incidents: usize,
    pub ongoing_incidents: usize,
    pub average_resolution_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactLegend {
    pub critical: LegendEntry,
    pub high: LegendEntry,
    pub medium: LegendEntry,
    pub low: LegendEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub organization: TimelineOrganizationSummary,
    pub timeline_period: TimelinePeriod,
    pub services: Vec<ServiceTimeline>,
    pub summary: TimelineSummary,
    pub impact_legend: ImpactLegend,
    pub generated_at: DateTime<Utc>,
}
