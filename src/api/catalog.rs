//! Label lists used to populate browse filters.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::recipe::{AreaLabel, Category, CategoryLabel, IngredientLabel};

/// # Endpoint
/// `GET /api/catalog/categories`
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryLabel>>>, ApiError> {
    let labels = state.search_service().categories().await?;
    Ok(Json(ApiResponse::success(labels)))
}

/// # Endpoint
/// `GET /api/catalog/areas`
pub async fn list_areas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AreaLabel>>>, ApiError> {
    let labels = state.search_service().areas().await?;
    Ok(Json(ApiResponse::success(labels)))
}

/// # Endpoint
/// `GET /api/catalog/ingredients`
pub async fn list_ingredients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<IngredientLabel>>>, ApiError> {
    let labels = state.search_service().ingredients().await?;
    Ok(Json(ApiResponse::success(labels)))
}

/// Categories with thumbnail and description.
///
/// # Endpoint
/// `GET /api/catalog/category-previews`
pub async fn category_previews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.search_service().category_previews().await?;
    Ok(Json(ApiResponse::success(categories)))
}
