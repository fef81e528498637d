// status-backend/src/repository/service_repository.rs
use crate::domain::service_model::{self, Entity as ServiceEntity};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, Set, Unchanged,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct ServiceRepository {
    db: DatabaseConnection,
}

impl ServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<service_model::Model>, DbErr> {
        ServiceEntity::find_by_id(id).one(&self.db).await
    }

    /// 組織スコープでサービスを検索（他組織のサービスは見えない）
    pub async fn find_by_id_in_org(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<service_model::Model>, DbErr> {
        ServiceEntity::find_by_id(id)
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
    }

    pub async fn find_by_organization_id(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<service_model::Model>, DbErr> {
        ServiceEntity::find()
            .filter(service_model::Column::OrganizationId.eq(organization_id))
            .order_by(service_model::Column::CreatedAt, Order::Asc)
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        service: &service_model::Model,
    ) -> Result<service_model::Model, DbErr> {
        let active = service_model::ActiveModel {
            id: Set(service.id),
            organization_id: Set(service.organization_id),
            name: Set(service.name.clone()),
            description: Set(service.description.clone()),
            status: Set(service.status.clone()),
            uptime_percentage: Set(service.uptime_percentage),
            created_at: Set(service.created_at),
            updated_at: Set(service.updated_at),
        };
        active.insert(&self.db).await
    }

    /// 可変フィールドの書き戻し（updated_at は before_save で自動更新）
    pub async fn update(
        &self,
        service: &service_model::Model,
    ) -> Result<service_model::Model, DbErr> {
        let active = service_model::ActiveModel {
            id: Unchanged(service.id),
            organization_id: Unchanged(service.organization_id),
            name: Set(service.name.clone()),
            description: Set(service.description.clone()),
            status: Set(service.status.clone()),
            uptime_percentage: Set(service.uptime_percentage),
            created_at: Unchanged(service.created_at),
            updated_at: Set(service.updated_at),
        };
        active.update(&self.db).await
    }

    /// ステータス列だけを書き換える（再計算エンジン用の単一フィールド更新）
    ///
    /// 読み取りと書き込みの間に行が消えていた場合は None を返す。
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<service_model::Model>, DbErr> {
        let active = service_model::ActiveModel {
            id: Unchanged(id),
            status: Set(status.to_string()),
            ..Default::default()
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = ServiceEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
