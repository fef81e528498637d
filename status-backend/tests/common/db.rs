//! Async TestDatabase helper for SeaORM.
//!
//! Docker を要求しないよう、一時ファイル上の SQLite に対してワークスペースの
//! マイグレーションを流してスキーマを構築する。

use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use status_backend::config::Config;
use status_backend::db::{self, DbPool};
use tempfile::TempDir;

pub struct TestDatabase {
    // テスト終了時にディレクトリごとDBファイルが消える
    _temp_dir: TempDir,
    pub connection: DbPool,
}

impl TestDatabase {
    pub async fn new() -> Self {
        super::init_test_env();

        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("status_test.sqlite");

        let config = Config {
            database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
            max_connections: 1,
        };

        let connection = db::create_db_pool(&config)
            .await
            .expect("connect to test database");

        // マイグレーションを実行
        Migrator::up(&connection, None)
            .await
            .expect("run migrations");

        Self {
            _temp_dir: temp_dir,
            connection,
        }
    }
}
