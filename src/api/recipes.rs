//! Recipe discovery endpoints.
//!
//! Lists degrade to an empty array when the provider is unavailable. The
//! detail endpoint reports 404 for unknown ids and 502 for upstream failures.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{
    MAX_RANDOM_COUNT, MAX_RECOMMENDATIONS, parse_search_criteria, validate_count,
};
use super::{ApiError, ApiResponse, AppState, CountQuery, IngredientsQuery, LimitQuery, SearchQuery};
use crate::domain::SearchCriteria;
use crate::models::recipe::RatedRecipe;

/// # Endpoint
/// `GET /api/recipes/search?by=name|letter|category|area|ingredient&q=...`
pub async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<RatedRecipe>>>, ApiError> {
    let criteria = parse_search_criteria(query.by.as_deref(), query.q.as_deref().unwrap_or(""))?;
    let results = state.search_service().search(&criteria).await;
    Ok(Json(ApiResponse::success(results)))
}

/// Recipes containing every listed ingredient.
///
/// # Endpoint
/// `GET /api/recipes/by-ingredients?ingredients=egg,milk`
pub async fn search_by_ingredients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IngredientsQuery>,
) -> Result<Json<ApiResponse<Vec<RatedRecipe>>>, ApiError> {
    let raw = query
        .ingredients
        .ok_or_else(|| ApiError::validation("ingredients is required"))?;

    let criteria = SearchCriteria::ingredient_set_from_csv(&raw);
    let results = state.search_service().search(&criteria).await;
    Ok(Json(ApiResponse::success(results)))
}

/// # Endpoint
/// `GET /api/recipes/random?count=`
pub async fn random_recipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountQuery>,
) -> Result<Json<ApiResponse<Vec<RatedRecipe>>>, ApiError> {
    let default_count = state.config().read().await.provider.random_sample_size;
    let count = validate_count(query.count.unwrap_or(default_count), MAX_RANDOM_COUNT)?;

    let results = state
        .search_service()
        .search(&SearchCriteria::RandomSample(count))
        .await;
    Ok(Json(ApiResponse::success(results)))
}

/// # Endpoint
/// `GET /api/recipes/{id}`
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RatedRecipe>>, ApiError> {
    let recipe = state.search_service().lookup_recipe(&id).await?;
    Ok(Json(ApiResponse::success(recipe)))
}

/// Recipes from the same category or area.
///
/// # Endpoint
/// `GET /api/recipes/{id}/recommendations?limit=`
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<RatedRecipe>>>, ApiError> {
    let default_limit = state.config().read().await.provider.recommendation_limit;
    let limit = validate_count(query.limit.unwrap_or(default_limit), MAX_RECOMMENDATIONS)?;

    let results = state.search_service().recommend_for(&id, limit).await;
    Ok(Json(ApiResponse::success(results)))
}
