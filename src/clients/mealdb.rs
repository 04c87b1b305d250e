use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::domain::FilterKind;
use crate::models::recipe::{
    AreaLabel, Category, CategoryLabel, IngredientLabel, IngredientLine, MAX_INGREDIENTS, Recipe,
    RecipeSummary,
};

pub const MEALDB_API: &str = "https://www.themealdb.com/api/json/v1/1";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Recipe provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Recipe provider returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Read-only view of the remote recipe catalogue.
///
/// An absent result is an empty sequence (or `None`), never an error.
/// Errors mean the call itself failed.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, ProviderError>;

    async fn search_by_name(&self, term: &str) -> Result<Vec<Recipe>, ProviderError>;

    /// Returns partial records; follow up with [`RecipeProvider::lookup`] for detail.
    async fn filter_by(
        &self,
        kind: FilterKind,
        value: &str,
    ) -> Result<Vec<RecipeSummary>, ProviderError>;

    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<Recipe>, ProviderError>;

    async fn random(&self) -> Result<Option<Recipe>, ProviderError>;

    async fn list_categories(&self) -> Result<Vec<CategoryLabel>, ProviderError>;

    async fn list_areas(&self) -> Result<Vec<AreaLabel>, ProviderError>;

    async fn list_ingredients(&self) -> Result<Vec<IngredientLabel>, ProviderError>;

    async fn categories(&self) -> Result<Vec<Category>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Option<Vec<RawCategory>>,
}

#[derive(Debug, Deserialize)]
struct RawMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(rename = "strTags")]
    tags: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
    #[serde(rename = "strSource")]
    source: Option<String>,
    /// `strIngredientN` / `strMeasureN` and whatever else the provider adds.
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategoryLabel {
    #[serde(rename = "strCategory")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawAreaLabel {
    #[serde(rename = "strArea")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawIngredientLabel {
    #[serde(rename = "idIngredient")]
    id: Option<String>,
    #[serde(rename = "strIngredient")]
    name: String,
    #[serde(rename = "strDescription")]
    description: Option<String>,
    #[serde(rename = "strType")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(rename = "idCategory")]
    id: String,
    #[serde(rename = "strCategory")]
    name: String,
    #[serde(rename = "strCategoryThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription")]
    description: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl RawMeal {
    fn slot(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
    }

    fn ingredient_lines(&self) -> Vec<IngredientLine> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|i| {
                let ingredient = self.slot(&format!("strIngredient{i}"))?;
                if ingredient.is_empty() {
                    return None;
                }
                let measure = self.slot(&format!("strMeasure{i}")).unwrap_or_default();
                Some(IngredientLine {
                    ingredient: ingredient.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }

    fn into_recipe(self) -> Recipe {
        let ingredients = self.ingredient_lines();
        let tags = self
            .tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Recipe {
            id: self.id,
            name: self.name,
            thumbnail: non_blank(self.thumbnail),
            category: non_blank(self.category),
            area: non_blank(self.area),
            instructions: non_blank(self.instructions),
            ingredients,
            tags,
            video_url: non_blank(self.youtube),
            source_url: non_blank(self.source),
        }
    }
}

#[derive(Clone)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Reuses a pooled client; `base_url` is the provider's API root.
    pub fn with_shared_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &str,
    ) -> Result<T, ProviderError> {
        let url = if query.is_empty() {
            format!("{}/{}", self.base_url, endpoint)
        } else {
            format!("{}/{}?{}", self.base_url, endpoint, query)
        };
        debug!(%url, "recipe provider request");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                metrics::counter!("provider_requests_total", "endpoint" => endpoint, "outcome" => "error")
                    .increment(1);
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            metrics::counter!("provider_requests_total", "endpoint" => endpoint, "outcome" => "error")
                .increment(1);
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        metrics::counter!("provider_requests_total", "endpoint" => endpoint, "outcome" => "success")
            .increment(1);

        Ok(response.json().await?)
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &str,
    ) -> Result<Vec<T>, ProviderError> {
        let envelope: MealsEnvelope<T> = self.get_json(endpoint, query).await?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeProvider for MealDbClient {
    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, ProviderError> {
        let query = format!("i={}", urlencoding::encode(id));
        let meals: Vec<RawMeal> = self.get_meals("lookup.php", &query).await?;
        Ok(meals.into_iter().next().map(RawMeal::into_recipe))
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Recipe>, ProviderError> {
        let query = format!("s={}", urlencoding::encode(term));
        let meals: Vec<RawMeal> = self.get_meals("search.php", &query).await?;
        Ok(meals.into_iter().map(RawMeal::into_recipe).collect())
    }

    async fn filter_by(
        &self,
        kind: FilterKind,
        value: &str,
    ) -> Result<Vec<RecipeSummary>, ProviderError> {
        let query = format!("{}={}", kind.query_key(), urlencoding::encode(value));
        let meals: Vec<RawSummary> = self.get_meals("filter.php", &query).await?;
        Ok(meals
            .into_iter()
            .map(|m| RecipeSummary {
                id: m.id,
                name: m.name,
                thumbnail: non_blank(m.thumbnail),
            })
            .collect())
    }

    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<Recipe>, ProviderError> {
        let query = format!("f={}", urlencoding::encode(&letter.to_string()));
        let meals: Vec<RawMeal> = self.get_meals("search.php", &query).await?;
        Ok(meals.into_iter().map(RawMeal::into_recipe).collect())
    }

    async fn random(&self) -> Result<Option<Recipe>, ProviderError> {
        let meals: Vec<RawMeal> = self.get_meals("random.php", "").await?;
        Ok(meals.into_iter().next().map(RawMeal::into_recipe))
    }

    async fn list_categories(&self) -> Result<Vec<CategoryLabel>, ProviderError> {
        let rows: Vec<RawCategoryLabel> = self.get_meals("list.php", "c=list").await?;
        Ok(rows
            .into_iter()
            .map(|r| CategoryLabel { name: r.name })
            .collect())
    }

    async fn list_areas(&self) -> Result<Vec<AreaLabel>, ProviderError> {
        let rows: Vec<RawAreaLabel> = self.get_meals("list.php", "a=list").await?;
        Ok(rows.into_iter().map(|r| AreaLabel { name: r.name }).collect())
    }

    async fn list_ingredients(&self) -> Result<Vec<IngredientLabel>, ProviderError> {
        let rows: Vec<RawIngredientLabel> = self.get_meals("list.php", "i=list").await?;
        Ok(rows
            .into_iter()
            .map(|r| IngredientLabel {
                id: r.id,
                name: r.name,
                description: non_blank(r.description),
                kind: non_blank(r.kind),
            })
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, ProviderError> {
        let envelope: CategoriesEnvelope = self.get_json("categories.php", "").await?;
        Ok(envelope
            .categories
            .unwrap_or_default()
            .into_iter()
            .map(|c| Category {
                id: c.id,
                name: c.name,
                thumbnail: non_blank(c.thumbnail),
                description: non_blank(c.description),
            })
            .collect())
    }
}
