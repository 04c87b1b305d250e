//! Favorites API endpoints.
//!
//! The caller's user id travels in the body, path or query string; the
//! identity provider that issued it is not consulted here.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::require_field;
use super::{
    AddFavoriteRequest, ApiError, ApiResponse, AppState, ClearedDto, FavoriteCheckDto,
    FavoriteCheckQuery, MessageDto, RemoveFavoriteRequest,
};
use crate::models::favorite::{Favorite, FavoriteRecipe};
use crate::services::{AddOutcome, RemoveOutcome};

/// Saves a recipe for a user.
///
/// # Endpoint
/// `POST /api/favorites/add`
///
/// Returns 201 when added, 409 when the recipe is already saved.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageDto>>), ApiError> {
    let user_id = require_field(payload.user_id.as_deref(), "userId")?;
    let meal_id = require_field(payload.meal_id.as_deref(), "mealId")?;
    let meal_name = require_field(payload.meal_name.as_deref(), "mealName")?;

    match state
        .favorite_service()
        .add(&user_id, &meal_id, &meal_name)
        .await?
    {
        AddOutcome::Added => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(MessageDto::new(
                "Recipe added to favorites",
            ))),
        )),
        AddOutcome::AlreadyExists => Err(ApiError::Conflict(
            "Recipe already in favorites".to_string(),
        )),
    }
}

/// # Endpoint
/// `DELETE /api/favorites/remove`
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RemoveFavoriteRequest>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let user_id = require_field(payload.user_id.as_deref(), "userId")?;
    let meal_id = require_field(payload.meal_id.as_deref(), "mealId")?;
    remove(&state, &user_id, &meal_id).await
}

/// # Endpoint
/// `DELETE /api/favorites/{user_id}/{meal_id}`
pub async fn remove_favorite_by_path(
    State(state): State<Arc<AppState>>,
    Path((user_id, meal_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    remove(&state, &user_id, &meal_id).await
}

async fn remove(
    state: &AppState,
    user_id: &str,
    meal_id: &str,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    match state.favorite_service().remove(user_id, meal_id).await? {
        RemoveOutcome::Removed => Ok(Json(ApiResponse::success(MessageDto::new(
            "Recipe removed from favorites",
        )))),
        RemoveOutcome::NotFound => Err(ApiError::not_found("Favorite", meal_id)),
    }
}

/// # Endpoint
/// `DELETE /api/favorites/clear/{user_id}`
pub async fn clear_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<ClearedDto>>, ApiError> {
    let removed = state.favorite_service().clear_all(&user_id).await?;
    Ok(Json(ApiResponse::success(ClearedDto { removed })))
}

/// # Endpoint
/// `GET /api/favorites/{user_id}`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Favorite>>>, ApiError> {
    let favorites = state.favorite_service().list(&user_id).await?;
    Ok(Json(ApiResponse::success(favorites)))
}

/// Favorites joined with the provider's current title and thumbnail.
///
/// # Endpoint
/// `GET /api/favorites/{user_id}/recipes`
pub async fn list_favorite_recipes(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<FavoriteRecipe>>>, ApiError> {
    let favorites = state.favorite_service().list(&user_id).await?;
    let recipes = state.search_service().favorite_recipes(favorites).await;
    Ok(Json(ApiResponse::success(recipes)))
}

/// # Endpoint
/// `GET /api/favorites/check?userId=&mealId=`
pub async fn check_favorite(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FavoriteCheckQuery>,
) -> Result<Json<ApiResponse<FavoriteCheckDto>>, ApiError> {
    let user_id = require_field(query.user_id.as_deref(), "userId")?;
    let meal_id = require_field(query.meal_id.as_deref(), "mealId")?;

    let favorited = state.favorite_service().exists(&user_id, &meal_id).await?;
    Ok(Json(ApiResponse::success(FavoriteCheckDto { favorited })))
}
