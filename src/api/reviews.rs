//! Reviews API endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::require_field;
use super::{ApiError, ApiResponse, AppState, DeleteReviewRequest, MessageDto, ReviewRequest};
use crate::models::review::{AggregateRating, Review};
use crate::services::ReviewSubmission;

/// Every review, for bulk rating aggregation on the client.
///
/// # Endpoint
/// `GET /api/reviews`
pub async fn list_all_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    let reviews = state.review_service().list_all().await?;
    Ok(Json(ApiResponse::success(reviews)))
}

/// # Endpoint
/// `GET /api/reviews/{meal_id}`
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(meal_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    let reviews = state.review_service().list(&meal_id).await?;
    Ok(Json(ApiResponse::success(reviews)))
}

/// # Endpoint
/// `GET /api/reviews/{meal_id}/summary`
pub async fn review_summary(
    State(state): State<Arc<AppState>>,
    Path(meal_id): Path<String>,
) -> Result<Json<ApiResponse<AggregateRating>>, ApiError> {
    let summary = state.review_service().summary(&meal_id).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// # Endpoint
/// `GET /api/reviews/user/{user_id}`
pub async fn list_user_reviews(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    let reviews = state.review_service().list_by_user(&user_id).await?;
    Ok(Json(ApiResponse::success(reviews)))
}

/// Creates the caller's review, or rewrites it if one exists.
///
/// # Endpoint
/// `POST /api/reviews/{meal_id}` and `PUT /api/reviews/{meal_id}`
pub async fn upsert_review(
    State(state): State<Arc<AppState>>,
    Path(meal_id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ApiResponse<Review>>, ApiError> {
    let submission = ReviewSubmission {
        user_id: payload.user_id,
        user_name: payload.user_name,
        rating: payload.rating,
        comment: payload.comment,
    };

    let review = state.review_service().upsert(&meal_id, submission).await?;
    Ok(Json(ApiResponse::success(review)))
}

/// # Endpoint
/// `DELETE /api/reviews/{meal_id}/{review_id}`
///
/// Only the author may delete; anyone else gets 403.
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path((meal_id, review_id)): Path<(String, String)>,
    Json(payload): Json<DeleteReviewRequest>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let user_id = require_field(payload.user_id.as_deref(), "userId")?;

    state
        .review_service()
        .remove(&meal_id, &review_id, &user_id)
        .await?;

    Ok(Json(ApiResponse::success(MessageDto::new("Review deleted"))))
}
