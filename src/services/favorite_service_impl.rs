//! `SeaORM` implementation of the `FavoriteService` trait.

use crate::db::Store;
use crate::models::favorite::Favorite;
use crate::services::favorite_service::{
    AddOutcome, FavoriteError, FavoriteService, RemoveOutcome,
};
use async_trait::async_trait;

pub struct SeaOrmFavoriteService {
    store: Store,
}

impl SeaOrmFavoriteService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn require(value: &str, field: &str) -> Result<(), FavoriteError> {
        if value.trim().is_empty() {
            return Err(FavoriteError::Validation(format!("{field} is required")));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteService for SeaOrmFavoriteService {
    async fn add(
        &self,
        user_id: &str,
        meal_id: &str,
        meal_name: &str,
    ) -> Result<AddOutcome, FavoriteError> {
        Self::require(user_id, "userId")?;
        Self::require(meal_id, "mealId")?;
        Self::require(meal_name, "mealName")?;

        if self.store.add_favorite(user_id, meal_id, meal_name).await? {
            Ok(AddOutcome::Added)
        } else {
            Ok(AddOutcome::AlreadyExists)
        }
    }

    async fn remove(&self, user_id: &str, meal_id: &str) -> Result<RemoveOutcome, FavoriteError> {
        Self::require(user_id, "userId")?;
        Self::require(meal_id, "mealId")?;

        if self.store.remove_favorite(user_id, meal_id).await? {
            Ok(RemoveOutcome::Removed)
        } else {
            Ok(RemoveOutcome::NotFound)
        }
    }

    async fn clear_all(&self, user_id: &str) -> Result<u64, FavoriteError> {
        Self::require(user_id, "userId")?;
        Ok(self.store.clear_favorites(user_id).await?)
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>, FavoriteError> {
        Ok(self.store.list_favorites(user_id).await?)
    }

    async fn exists(&self, user_id: &str, meal_id: &str) -> Result<bool, FavoriteError> {
        Ok(self.store.is_favorite(user_id, meal_id).await?)
    }
}
