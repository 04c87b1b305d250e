use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::{MealDbClient, RecipeProvider};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    FavoriteService, ReviewService, SeaOrmFavoriteService, SeaOrmReviewService, SearchService,
};

/// Build a shared HTTP client for provider calls.
pub fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("Gitchen/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub provider: Arc<dyn RecipeProvider>,

    pub review_service: Arc<dyn ReviewService>,

    pub favorite_service: Arc<dyn FavoriteService>,

    pub search_service: Arc<SearchService>,
}

impl SharedState {
    /// Opens the configured database and talks to the configured provider.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client =
            build_shared_http_client(config.provider.request_timeout_seconds.into())?;
        let provider: Arc<dyn RecipeProvider> = Arc::new(MealDbClient::with_shared_client(
            http_client,
            config.provider.base_url.clone(),
        ));

        Self::with_provider(config, provider).await
    }

    /// Same as [`SharedState::new`] with a caller-supplied provider.
    pub async fn with_provider(
        config: Config,
        provider: Arc<dyn RecipeProvider>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::from_parts(config, store, provider))
    }

    #[must_use]
    pub fn from_parts(config: Config, store: Store, provider: Arc<dyn RecipeProvider>) -> Self {
        let review_service: Arc<dyn ReviewService> =
            Arc::new(SeaOrmReviewService::new(store.clone()));
        let favorite_service: Arc<dyn FavoriteService> =
            Arc::new(SeaOrmFavoriteService::new(store.clone()));
        let search_service = Arc::new(SearchService::new(
            provider.clone(),
            review_service.clone(),
        ));

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            provider,
            review_service,
            favorite_service,
            search_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
