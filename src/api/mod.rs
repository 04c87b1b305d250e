use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::RecipeProvider;
use crate::config::Config;
use crate::services::{FavoriteService, ReviewService, SearchService};
use crate::state::SharedState;

mod catalog;
mod error;
mod favorites;
mod observability;
mod recipes;
mod reviews;
mod system;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn search_service(&self) -> &Arc<SearchService> {
        &self.shared.search_service
    }

    #[must_use]
    pub fn review_service(&self) -> &Arc<dyn ReviewService> {
        &self.shared.review_service
    }

    #[must_use]
    pub fn favorite_service(&self) -> &Arc<dyn FavoriteService> {
        &self.shared.favorite_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Like [`create_app_state_from_config`] but with a caller-supplied recipe provider.
pub async fn create_app_state_with_provider(
    config: Config,
    provider: Arc<dyn RecipeProvider>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_provider(config, provider).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let api_router = api_routes()
        .route_layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/favorites/add", post(favorites::add_favorite))
        .route("/favorites/remove", delete(favorites::remove_favorite))
        .route("/favorites/check", get(favorites::check_favorite))
        .route("/favorites/clear/{user_id}", delete(favorites::clear_favorites))
        .route("/favorites/{user_id}", get(favorites::list_favorites))
        .route(
            "/favorites/{user_id}/recipes",
            get(favorites::list_favorite_recipes),
        )
        .route(
            "/favorites/{user_id}/{meal_id}",
            delete(favorites::remove_favorite_by_path),
        )
        .route("/reviews", get(reviews::list_all_reviews))
        .route("/reviews/user/{user_id}", get(reviews::list_user_reviews))
        .route("/reviews/{meal_id}", get(reviews::list_reviews))
        .route("/reviews/{meal_id}", post(reviews::upsert_review))
        .route("/reviews/{meal_id}", put(reviews::upsert_review))
        .route("/reviews/{meal_id}/summary", get(reviews::review_summary))
        .route(
            "/reviews/{meal_id}/{review_id}",
            delete(reviews::delete_review),
        )
        .route("/recipes/search", get(recipes::search_recipes))
        .route("/recipes/by-ingredients", get(recipes::search_by_ingredients))
        .route("/recipes/random", get(recipes::random_recipes))
        .route("/recipes/{id}", get(recipes::get_recipe))
        .route(
            "/recipes/{id}/recommendations",
            get(recipes::get_recommendations),
        )
        .route("/catalog/categories", get(catalog::list_categories))
        .route("/catalog/areas", get(catalog::list_areas))
        .route("/catalog/ingredients", get(catalog::list_ingredients))
        .route(
            "/catalog/category-previews",
            get(catalog::category_previews),
        )
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
}
