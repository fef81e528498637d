// status-backend/src/error.rs

use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// NotFound かチェック（呼び出し元が「対象なし」と失敗を区別するため）
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}
