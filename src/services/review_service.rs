//! Domain service for recipe reviews.
//!
//! One review per (user, meal): posting again rewrites the existing review.
//! Only the author may delete a review.

use crate::models::review::{AggregateRating, Review};
use std::collections::HashMap;
use thiserror::Error;

/// A review as submitted by a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReviewSubmission {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Review not found: {0}")]
    NotFound(String),

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ReviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait ReviewService: Send + Sync {
    /// Reviews for one meal, oldest first.
    async fn list(&self, meal_id: &str) -> Result<Vec<Review>, ReviewError>;

    /// Reviews written by one user, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Review>, ReviewError>;

    async fn list_all(&self) -> Result<Vec<Review>, ReviewError>;

    async fn summary(&self, meal_id: &str) -> Result<AggregateRating, ReviewError>;

    /// Aggregates for many meals at once. Meals without reviews are omitted.
    async fn ratings_for(
        &self,
        meal_ids: &[String],
    ) -> Result<HashMap<String, AggregateRating>, ReviewError>;

    /// Creates the caller's review for `meal_id`, or rewrites it in place.
    async fn upsert(
        &self,
        meal_id: &str,
        submission: ReviewSubmission,
    ) -> Result<Review, ReviewError>;

    async fn remove(
        &self,
        meal_id: &str,
        review_id: &str,
        requesting_user_id: &str,
    ) -> Result<(), ReviewError>;
}
