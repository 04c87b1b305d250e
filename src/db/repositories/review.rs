use crate::entities::{prelude::*, reviews};
use crate::models::review::{AggregateRating, Review};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashMap;

/// Fields written on insert or update.
#[derive(Debug, Clone)]
pub struct ReviewInput<'a> {
    pub meal_id: &'a str,
    pub user_id: &'a str,
    pub user_name: &'a str,
    pub rating: i32,
    pub comment: &'a str,
}

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: reviews::Model) -> Review {
        Review {
            id: m.id,
            meal_id: m.meal_id,
            user_id: m.user_id,
            user_name: m.user_name,
            rating: m.rating,
            comment: m.comment,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Review>> {
        let row = Reviews::find_by_id(id.to_string()).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn find_by_author(&self, meal_id: &str, user_id: &str) -> Result<Option<Review>> {
        let row = Reviews::find()
            .filter(reviews::Column::MealId.eq(meal_id))
            .filter(reviews::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn list_for_meal(&self, meal_id: &str) -> Result<Vec<Review>> {
        let rows = Reviews::find()
            .filter(reviews::Column::MealId.eq(meal_id))
            .order_by_asc(reviews::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Review>> {
        let rows = Reviews::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Review>> {
        let rows = Reviews::find()
            .order_by_asc(reviews::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Aggregates ratings for the given meals in one read. Meals without
    /// reviews are absent from the map.
    pub async fn ratings_for(&self, meal_ids: &[String]) -> Result<HashMap<String, AggregateRating>> {
        if meal_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(String, i32)> = Reviews::find()
            .select_only()
            .column(reviews::Column::MealId)
            .column(reviews::Column::Rating)
            .filter(reviews::Column::MealId.is_in(meal_ids.iter().cloned()))
            .into_tuple()
            .all(&self.conn)
            .await?;

        let mut grouped: HashMap<String, Vec<i32>> = HashMap::new();
        for (meal_id, rating) in rows {
            grouped.entry(meal_id).or_default().push(rating);
        }

        Ok(grouped
            .into_iter()
            .map(|(meal_id, ratings)| (meal_id, AggregateRating::from_ratings(ratings)))
            .collect())
    }

    /// Inserts the review, or rewrites rating, comment, display name and
    /// `updated_at` of the author's existing review for the meal. Id and
    /// `created_at` of an existing review are kept.
    pub async fn upsert(&self, input: &ReviewInput<'_>) -> Result<Review> {
        let now = super::timestamp_now();
        let active_model = reviews::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            meal_id: Set(input.meal_id.to_string()),
            user_id: Set(input.user_id.to_string()),
            user_name: Set(input.user_name.to_string()),
            rating: Set(input.rating),
            comment: Set(input.comment.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        Reviews::insert(active_model)
            .on_conflict(
                OnConflict::columns([reviews::Column::MealId, reviews::Column::UserId])
                    .update_columns([
                        reviews::Column::UserName,
                        reviews::Column::Rating,
                        reviews::Column::Comment,
                        reviews::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.find_by_author(input.meal_id, input.user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Review for meal {} vanished after upsert", input.meal_id))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Reviews::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
