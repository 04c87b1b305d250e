//! Recipe search and enrichment.
//!
//! Fans out provider calls concurrently, merges the partial results by id,
//! materialises full recipes and decorates them with review aggregates.
//! The browsing paths (`search`, `recommend`, `favorite_recipes`) never fail:
//! upstream or store errors are logged and yield an empty result.

use futures::future::{join_all, try_join_all};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clients::{ProviderError, RecipeProvider};
use crate::domain::{FilterKind, SearchCriteria};
use crate::models::favorite::{Favorite, FavoriteRecipe};
use crate::models::recipe::{
    AreaLabel, Category, CategoryLabel, IngredientLabel, RatedRecipe, Recipe, RecipeSummary,
};
use crate::services::review_service::{ReviewError, ReviewService};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("Review store error: {0}")]
    Store(#[from] ReviewError),
}

pub struct SearchService {
    provider: Arc<dyn RecipeProvider>,
    reviews: Arc<dyn ReviewService>,
}

impl SearchService {
    #[must_use]
    pub fn new(provider: Arc<dyn RecipeProvider>, reviews: Arc<dyn ReviewService>) -> Self {
        Self { provider, reviews }
    }

    /// Runs a search, degrading to an empty list on any failure.
    pub async fn search(&self, criteria: &SearchCriteria) -> Vec<RatedRecipe> {
        metrics::counter!("recipe_searches_total", "by" => criteria.label()).increment(1);

        match self.try_search(criteria).await {
            Ok(results) => {
                debug!(by = criteria.label(), count = results.len(), "Search finished");
                results
            }
            Err(e) => {
                warn!(by = criteria.label(), error = %e, "Search failed, returning no results");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, criteria: &SearchCriteria) -> Result<Vec<RatedRecipe>, SearchError> {
        let recipes = match criteria {
            SearchCriteria::ByName(term) => self.provider.search_by_name(term).await?,
            SearchCriteria::ByFirstLetter(letter) => {
                self.provider.search_by_first_letter(*letter).await?
            }
            SearchCriteria::ByCategory(name) => {
                self.filter_and_lookup(FilterKind::Category, name).await?
            }
            SearchCriteria::ByArea(name) => self.filter_and_lookup(FilterKind::Area, name).await?,
            SearchCriteria::ByIngredient(name) => {
                self.filter_and_lookup(FilterKind::Ingredient, name).await?
            }
            SearchCriteria::ByIngredientSet(set) => {
                let ids = self.ingredient_intersection(set.iter()).await?;
                self.lookup_many(&ids).await?
            }
            SearchCriteria::RandomSample(n) => self.random_sample(*n).await?,
        };

        self.decorate(recipes).await
    }

    async fn filter_and_lookup(
        &self,
        kind: FilterKind,
        value: &str,
    ) -> Result<Vec<Recipe>, ProviderError> {
        let summaries = self.provider.filter_by(kind, value).await?;
        let ids: Vec<String> = summaries.into_iter().map(|s| s.id).collect();
        self.lookup_many(&ids).await
    }

    /// Ids of recipes that contain every ingredient, in the order the first
    /// ingredient's listing returned them.
    async fn ingredient_intersection<'a, I>(&self, ingredients: I) -> Result<Vec<String>, ProviderError>
    where
        I: Iterator<Item = &'a String>,
    {
        let listings = try_join_all(
            ingredients.map(|name| self.provider.filter_by(FilterKind::Ingredient, name)),
        )
        .await?;

        Ok(intersect_ids(&listings))
    }

    async fn random_sample(&self, n: usize) -> Result<Vec<Recipe>, ProviderError> {
        let draws = try_join_all((0..n).map(|_| self.provider.random())).await?;

        let mut seen = HashSet::new();
        Ok(draws
            .into_iter()
            .flatten()
            .filter(|r| seen.insert(r.id.clone()))
            .collect())
    }

    /// Full records for `ids`, concurrently. Ids the provider no longer knows are dropped.
    pub async fn lookup_many(&self, ids: &[String]) -> Result<Vec<Recipe>, ProviderError> {
        let found = try_join_all(ids.iter().map(|id| self.provider.lookup(id))).await?;
        Ok(found.into_iter().flatten().collect())
    }

    /// Attaches the aggregate rating and review count to each recipe.
    pub async fn decorate(&self, recipes: Vec<Recipe>) -> Result<Vec<RatedRecipe>, SearchError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = recipes.iter().map(|r| r.id.clone()).collect();
        let ratings = self.reviews.ratings_for(&ids).await?;

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let agg = ratings.get(&recipe.id).copied().unwrap_or_default();
                RatedRecipe {
                    recipe,
                    rating: agg.rating,
                    review_count: agg.review_count,
                }
            })
            .collect())
    }

    /// Detail view for one recipe. Distinguishes "not found" from an upstream failure.
    pub async fn lookup_recipe(&self, id: &str) -> Result<RatedRecipe, SearchError> {
        let recipe = self
            .provider
            .lookup(id)
            .await?
            .ok_or_else(|| SearchError::NotFound(id.to_string()))?;

        self.decorate(vec![recipe])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::NotFound(id.to_string()))
    }

    /// Recipes sharing the category or area, excluding `current_id`.
    pub async fn recommend(
        &self,
        category: Option<&str>,
        area: Option<&str>,
        current_id: &str,
        limit: usize,
    ) -> Vec<RatedRecipe> {
        match self.try_recommend(category, area, current_id, limit).await {
            Ok(results) => results,
            Err(e) => {
                warn!(current_id, error = %e, "Recommendations failed, returning none");
                Vec::new()
            }
        }
    }

    /// Looks the recipe up first, then recommends from its category and area.
    pub async fn recommend_for(&self, id: &str, limit: usize) -> Vec<RatedRecipe> {
        match self.provider.lookup(id).await {
            Ok(Some(recipe)) => {
                self.recommend(
                    recipe.category.as_deref(),
                    recipe.area.as_deref(),
                    &recipe.id,
                    limit,
                )
                .await
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(id, error = %e, "Recommendations failed, returning none");
                Vec::new()
            }
        }
    }

    async fn try_recommend(
        &self,
        category: Option<&str>,
        area: Option<&str>,
        current_id: &str,
        limit: usize,
    ) -> Result<Vec<RatedRecipe>, SearchError> {
        let (by_category, by_area) = futures::try_join!(
            self.filter_optional(FilterKind::Category, category),
            self.filter_optional(FilterKind::Area, area),
        )?;

        let ids: Vec<String> = merge_by_id(by_category.into_iter().chain(by_area))
            .into_iter()
            .map(|s| s.id)
            .filter(|id| id != current_id)
            .take(limit)
            .collect();

        let recipes = self.lookup_many(&ids).await?;
        self.decorate(recipes).await
    }

    async fn filter_optional(
        &self,
        kind: FilterKind,
        value: Option<&str>,
    ) -> Result<Vec<RecipeSummary>, ProviderError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.provider.filter_by(kind, v).await,
            None => Ok(Vec::new()),
        }
    }

    /// Joins favorites with the provider's current record. Favorites that no
    /// longer resolve are left out.
    pub async fn favorite_recipes(&self, favorites: Vec<Favorite>) -> Vec<FavoriteRecipe> {
        let lookups = join_all(favorites.iter().map(|f| self.provider.lookup(&f.meal_id))).await;

        favorites
            .into_iter()
            .zip(lookups)
            .filter_map(|(favorite, lookup)| match lookup {
                Ok(Some(recipe)) => Some(FavoriteRecipe {
                    favorite,
                    title: recipe.name,
                    image: recipe.thumbnail,
                }),
                Ok(None) => {
                    debug!(meal_id = %favorite.meal_id, "Favorite no longer resolves");
                    None
                }
                Err(e) => {
                    warn!(meal_id = %favorite.meal_id, error = %e, "Favorite lookup failed");
                    None
                }
            })
            .collect()
    }

    pub async fn categories(&self) -> Result<Vec<CategoryLabel>, SearchError> {
        Ok(self.provider.list_categories().await?)
    }

    pub async fn areas(&self) -> Result<Vec<AreaLabel>, SearchError> {
        Ok(self.provider.list_areas().await?)
    }

    pub async fn ingredients(&self) -> Result<Vec<IngredientLabel>, SearchError> {
        Ok(self.provider.list_ingredients().await?)
    }

    pub async fn category_previews(&self) -> Result<Vec<Category>, SearchError> {
        Ok(self.provider.categories().await?)
    }
}

/// Ids present in every listing, ordered as in the first one.
fn intersect_ids(listings: &[Vec<RecipeSummary>]) -> Vec<String> {
    let Some((first, rest)) = listings.split_first() else {
        return Vec::new();
    };

    let others: Vec<HashSet<&str>> = rest
        .iter()
        .map(|l| l.iter().map(|s| s.id.as_str()).collect())
        .collect();

    let mut seen = HashSet::new();
    first
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| others.iter().all(|o| o.contains(id)))
        .filter(|id| seen.insert(*id))
        .map(ToString::to_string)
        .collect()
}

/// Deduplicates by id. Position is that of the first sighting, the record
/// kept is the last one seen.
fn merge_by_id<I>(summaries: I) -> Vec<RecipeSummary>
where
    I: IntoIterator<Item = RecipeSummary>,
{
    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, RecipeSummary> = HashMap::new();

    for summary in summaries {
        if by_id.insert(summary.id.clone(), summary.clone()).is_none() {
            order.push(summary.id);
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect()
}
