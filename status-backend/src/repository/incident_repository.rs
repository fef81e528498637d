// status-backend/src/repository/incident_repository.rs
use crate::domain::incident_impact::IncidentImpact;
use crate::domain::incident_model::{self, Entity as IncidentEntity};
use crate::domain::incident_status::IncidentStatus;
use crate::domain::service_model;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, Unchanged,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct IncidentRepository {
    db: DatabaseConnection,
}

impl IncidentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // インシデントは組織を直接知らないため、組織スコープは services 経由の結合で掛ける

    pub async fn find_by_id_in_org(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<incident_model::Model>, DbErr> {
        IncidentEntity::find_by_id(id)
            .join(JoinType::InnerJoin, incident_model::Relation::Service.def())
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
    }

    pub async fn find_by_service_id(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<incident_model::Model>, DbErr> {
        IncidentEntity::find()
            .filter(incident_model::Column::ServiceId.eq(service_id))
            .order_by(incident_model::Column::CreatedAt, Order::Desc)
            .all(&self.db)
            .await
    }

    /// サービスのアクティブ（未解決）インシデントを取得
    pub async fn find_active_by_service_id(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<incident_model::Model>, DbErr> {
        IncidentEntity::find()
            .filter(incident_model::Column::ServiceId.eq(service_id))
            .filter(incident_model::Column::Status.ne(IncidentStatus::Resolved.as_str()))
            .all(&self.db)
            .await
    }

    pub async fn find_by_organization_id(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<incident_model::Model>, DbErr> {
        IncidentEntity::find()
            .join(JoinType::InnerJoin, incident_model::Relation::Service.def())
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .order_by(incident_model::Column::CreatedAt, Order::Desc)
            .all(&self.db)
            .await
    }

    pub async fn find_active_by_organization_id(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<incident_model::Model>, DbErr> {
        IncidentEntity::find()
            .join(JoinType::InnerJoin, incident_model::Relation::Service.def())
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .filter(incident_model::Column::Status.ne(IncidentStatus::Resolved.as_str()))
            .order_by(incident_model::Column::CreatedAt, Order::Desc)
            .all(&self.db)
            .await
    }

    /// 指定日時以降に作成された組織のインシデントを取得（タイムライン・公開ページ用）
    pub async fn find_by_organization_since(
        &self,
        organization_id: Uuid,
        since: DateTime<Utc>,
        order: Order,
    ) -> Result<Vec<incident_model::Model>, DbErr> {
        IncidentEntity::find()
            .join(JoinType::InnerJoin, incident_model::Relation::Service.def())
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .filter(incident_model::Column::CreatedAt.gte(since))
            .order_by(incident_model::Column::CreatedAt, order)
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        incident: &incident_model::Model,
    ) -> Result<incident_model::Model, DbErr> {
        let active = incident_model::ActiveModel {
            id: Set(incident.id),
            service_id: Set(incident.service_id),
            title: Set(incident.title.clone()),
            description: Set(incident.description.clone()),
            status: Set(incident.status.clone()),
            impact: Set(incident.impact.clone()),
            created_by: Set(incident.created_by),
            resolved_at: Set(incident.resolved_at),
            created_at: Set(incident.created_at),
            updated_at: Set(incident.updated_at),
        };
        active.insert(&self.db).await
    }

    /// 可変フィールドの書き戻し（updated_at は before_save で自動更新）
    pub async fn update(
        &self,
        incident: &incident_model::Model,
    ) -> Result<incident_model::Model, DbErr> {
        let active = incident_model::ActiveModel {
            id: Unchanged(incident.id),
            service_id: Unchanged(incident.service_id),
            title: Set(incident.title.clone()),
            description: Set(incident.description.clone()),
            status: Set(incident.status.clone()),
            impact: Set(incident.impact.clone()),
            created_by: Unchanged(incident.created_by),
            resolved_at: Set(incident.resolved_at),
            created_at: Unchanged(incident.created_at),
            updated_at: Set(incident.updated_at),
        };
        active.update(&self.db).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = IncidentEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    // --- 統計用のカウント ---

    pub async fn count_by_organization(&self, organization_id: Uuid) -> Result<u64, DbErr> {
        IncidentEntity::find()
            .join(JoinType::InnerJoin, incident_model::Relation::Service.def())
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .count(&self.db)
            .await
    }

    pub async fn count_active_by_organization(&self, organization_id: Uuid) -> Result<u64, DbErr> {
        IncidentEntity::find()
            .join(JoinType::InnerJoin, incident_model::Relation::Service.def())
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .filter(incident_model::Column::Status.ne(IncidentStatus::Resolved.as_str()))
            .count(&self.db)
            .await
    }

    pub async fn count_critical_active_by_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<u64, DbErr> {
        IncidentEntity::find()
            .join(JoinType::InnerJoin, incident_model::Relation::Service.def())
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .filter(incident_model::Column::Impact.eq(IncidentImpact::Critical.as_str()))
            .filter(incident_model::Column::Status.ne(IncidentStatus::Resolved.as_str()))
            .count(&self.db)
            .await
    }
}
