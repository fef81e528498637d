use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // サービス別のインシデント取得用インデックス
        manager
            .create_index(
                Index::create()
                    .table(Incidents::Table)
                    .name("idx_incidents_service_id")
                    .col(Incidents::ServiceId)
                    .to_owned(),
            )
            .await?;

        // タイムライン・公開ページの期間絞り込み用インデックス
        manager
            .create_index(
                Index::create()
                    .table(Incidents::Table)
                    .name("idx_incidents_created_at")
                    .col(Incidents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // アクティブインシデント（未解決）の走査用インデックス
        manager
            .create_index(
                Index::create()
                    .table(Incidents::Table)
                    .name("idx_incidents_service_id_status")
                    .col(Incidents::ServiceId)
                    .col(Incidents::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(Incidents::Table)
                    .name("idx_incidents_service_id_status")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(Incidents::Table)
                    .name("idx_incidents_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(Incidents::Table)
                    .name("idx_incidents_service_id")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Incidents {
    Table,
    ServiceId,
    Status,
    CreatedAt,
}
