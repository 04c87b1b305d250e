//! `SeaORM` implementation of the `ReviewService` trait.

use crate::db::{ReviewInput, Store};
use crate::domain::Rating;
use crate::models::review::{AggregateRating, Review};
use crate::services::review_service::{ReviewError, ReviewService, ReviewSubmission};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::info;

pub struct SeaOrmReviewService {
    store: Store,
}

impl SeaOrmReviewService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ReviewError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ReviewError::Validation(format!("{field} is required")))
}

#[async_trait]
impl ReviewService for SeaOrmReviewService {
    async fn list(&self, meal_id: &str) -> Result<Vec<Review>, ReviewError> {
        Ok(self.store.list_reviews_for_meal(meal_id).await?)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Review>, ReviewError> {
        Ok(self.store.list_reviews_for_user(user_id).await?)
    }

    async fn list_all(&self) -> Result<Vec<Review>, ReviewError> {
        Ok(self.store.list_all_reviews().await?)
    }

    async fn summary(&self, meal_id: &str) -> Result<AggregateRating, ReviewError> {
        let reviews = self.store.list_reviews_for_meal(meal_id).await?;
        Ok(AggregateRating::from_ratings(
            reviews.iter().map(|r| r.rating),
        ))
    }

    async fn ratings_for(
        &self,
        meal_ids: &[String],
    ) -> Result<HashMap<String, AggregateRating>, ReviewError> {
        Ok(self.store.ratings_for(meal_ids).await?)
    }

    async fn upsert(
        &self,
        meal_id: &str,
        submission: ReviewSubmission,
    ) -> Result<Review, ReviewError> {
        let user_id = required(submission.user_id, "userId")?;
        let user_name = required(submission.user_name, "userName")?;
        let comment = required(submission.comment, "comment")?;
        let rating = submission
            .rating
            .ok_or_else(|| ReviewError::Validation("rating is required".to_string()))
            .and_then(|r| Rating::try_from(r).map_err(ReviewError::Validation))?;

        let input = ReviewInput {
            meal_id,
            user_id: &user_id,
            user_name: &user_name,
            rating: rating.value(),
            comment: &comment,
        };

        let review = self.store.upsert_review(&input).await?;
        info!(meal_id, user_id = %user_id, review_id = %review.id, "Review saved");
        Ok(review)
    }

    async fn remove(
        &self,
        meal_id: &str,
        review_id: &str,
        requesting_user_id: &str,
    ) -> Result<(), ReviewError> {
        let review = self
            .store
            .get_review(review_id)
            .await?
            .filter(|r| r.meal_id == meal_id)
            .ok_or_else(|| ReviewError::NotFound(review_id.to_string()))?;

        if review.user_id != requesting_user_id {
            return Err(ReviewError::Forbidden(
                "You can only delete your own reviews".to_string(),
            ));
        }

        self.store.delete_review(review_id).await?;
        info!(meal_id, review_id, "Review deleted");
        Ok(())
    }
}
