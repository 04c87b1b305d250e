//! Domain service for a user's saved recipes.

use crate::models::favorite::Favorite;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for FavoriteError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait FavoriteService: Send + Sync {
    async fn add(
        &self,
        user_id: &str,
        meal_id: &str,
        meal_name: &str,
    ) -> Result<AddOutcome, FavoriteError>;

    async fn remove(&self, user_id: &str, meal_id: &str) -> Result<RemoveOutcome, FavoriteError>;

    /// Removes every favorite of the user and returns how many there were.
    async fn clear_all(&self, user_id: &str) -> Result<u64, FavoriteError>;

    /// Newest first.
    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>, FavoriteError>;

    async fn exists(&self, user_id: &str, meal_id: &str) -> Result<bool, FavoriteError>;
}
