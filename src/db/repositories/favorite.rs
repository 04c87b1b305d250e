use crate::entities::{favorites, prelude::*};
use crate::models::favorite::Favorite;
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Repository for saved recipes, keyed by (user, meal).
pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: favorites::Model) -> Favorite {
        Favorite {
            user_id: m.user_id,
            meal_id: m.meal_id,
            meal_name: m.meal_name,
            added_at: m.added_at,
        }
    }

    /// Inserts the favorite. Returns `false` when it was already present.
    pub async fn add(&self, user_id: &str, meal_id: &str, meal_name: &str) -> Result<bool> {
        let active_model = favorites::ActiveModel {
            user_id: Set(user_id.to_string()),
            meal_id: Set(meal_id.to_string()),
            meal_name: Set(meal_name.to_string()),
            added_at: Set(super::timestamp_now()),
        };

        let inserted = Favorites::insert(active_model)
            .on_conflict(
                OnConflict::columns([favorites::Column::UserId, favorites::Column::MealId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        if inserted > 0 {
            info!("Added favorite {} for user {}", meal_id, user_id);
        }
        Ok(inserted > 0)
    }

    pub async fn remove(&self, user_id: &str, meal_id: &str) -> Result<bool> {
        let result = Favorites::delete_by_id((user_id.to_string(), meal_id.to_string()))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn clear(&self, user_id: &str) -> Result<u64> {
        let result = Favorites::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected > 0 {
            info!(
                "Cleared {} favorites for user {}",
                result.rows_affected, user_id
            );
        }
        Ok(result.rows_affected)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Favorite>> {
        let rows = Favorites::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_desc(favorites::Column::AddedAt)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn exists(&self, user_id: &str, meal_id: &str) -> Result<bool> {
        let count = Favorites::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::MealId.eq(meal_id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }
}
