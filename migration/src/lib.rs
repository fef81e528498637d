// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// マイグレーションモジュール
mod m20260801_000001_create_organizations_table;
mod m20260801_000002_create_services_table;
mod m20260801_000003_create_incidents_table;
mod m20260801_000004_add_incident_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_organizations_table::Migration),
            Box::new(m20260801_000002_create_services_table::Migration),
            Box::new(m20260801_000003_create_incidents_table::Migration),
            Box::new(m20260801_000004_add_incident_indexes::Migration),
        ]
    }
}
