use crate::models::favorite::Favorite;
use crate::models::review::{AggregateRating, Review};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::review::ReviewInput;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// In-memory store with a single connection, so every query sees the same database.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    // ========== Favorites ==========

    pub async fn add_favorite(&self, user_id: &str, meal_id: &str, meal_name: &str) -> Result<bool> {
        self.favorite_repo().add(user_id, meal_id, meal_name).await
    }

    pub async fn remove_favorite(&self, user_id: &str, meal_id: &str) -> Result<bool> {
        self.favorite_repo().remove(user_id, meal_id).await
    }

    pub async fn clear_favorites(&self, user_id: &str) -> Result<u64> {
        self.favorite_repo().clear(user_id).await
    }

    pub async fn list_favorites(&self, user_id: &str) -> Result<Vec<Favorite>> {
        self.favorite_repo().list(user_id).await
    }

    pub async fn is_favorite(&self, user_id: &str, meal_id: &str) -> Result<bool> {
        self.favorite_repo().exists(user_id, meal_id).await
    }

    // ========== Reviews ==========

    pub async fn get_review(&self, id: &str) -> Result<Option<Review>> {
        self.review_repo().get(id).await
    }

    pub async fn list_reviews_for_meal(&self, meal_id: &str) -> Result<Vec<Review>> {
        self.review_repo().list_for_meal(meal_id).await
    }

    pub async fn list_reviews_for_user(&self, user_id: &str) -> Result<Vec<Review>> {
        self.review_repo().list_for_user(user_id).await
    }

    pub async fn list_all_reviews(&self) -> Result<Vec<Review>> {
        self.review_repo().list_all().await
    }

    pub async fn ratings_for(&self, meal_ids: &[String]) -> Result<HashMap<String, AggregateRating>> {
        self.review_repo().ratings_for(meal_ids).await
    }

    pub async fn upsert_review(&self, input: &ReviewInput<'_>) -> Result<Review> {
        self.review_repo().upsert(input).await
    }

    pub async fn delete_review(&self, id: &str) -> Result<bool> {
        self.review_repo().delete(id).await
    }
}
