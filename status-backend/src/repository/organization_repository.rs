// status-backend/src/repository/organization_repository.rs
use crate::domain::organization_model::{
    self, Entity as OrganizationEntity, OrganizationStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<organization_model::Model>, DbErr> {
        OrganizationEntity::find_by_id(id).one(&self.db).await
    }

    /// IDまたは組織名で検索する（公開ページはどちらでも引ける）
    pub async fn find_by_id_or_name(
        &self,
        identifier: &str,
    ) -> Result<Option<organization_model::Model>, DbErr> {
        let mut condition = Condition::any().add(organization_model::Column::Name.eq(identifier));
        if let Ok(id) = identifier.parse::<Uuid>() {
            condition = condition.add(organization_model::Column::Id.eq(id));
        }

        OrganizationEntity::find()
            .filter(condition)
            .one(&self.db)
            .await
    }

    /// 公開ディレクトリに掲載する組織（active / trial）を取得
    pub async fn find_publicly_listed(&self) -> Result<Vec<organization_model::Model>, DbErr> {
        OrganizationEntity::find()
            .filter(organization_model::Column::Status.is_in([
                OrganizationStatus::Active.as_str(),
                OrganizationStatus::Trial.as_str(),
            ]))
            .order_by(organization_model::Column::Name, Order::Asc)
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        organization: &organization_model::Model,
    ) -> Result<organization_model::Model, DbErr> {
        let active = organization_model::ActiveModel {
            id: Set(organization.id),
            name: Set(organization.name.clone()),
            description: Set(organization.description.clone()),
            website: Set(organization.website.clone()),
            status: Set(organization.status.clone()),
            created_at: Set(organization.created_at),
            updated_at: Set(organization.updated_at),
        };
        active.insert(&self.db).await
    }
}
