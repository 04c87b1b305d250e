#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use gitchen::api::AppState;
use gitchen::clients::{ProviderError, RecipeProvider};
use gitchen::config::Config;
use gitchen::domain::FilterKind;
use gitchen::models::recipe::{
    AreaLabel, Category, CategoryLabel, IngredientLabel, IngredientLine, Recipe, RecipeSummary,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-process stand-in for the recipe API.
pub struct FakeProvider {
    recipes: Vec<Recipe>,
    failing: AtomicBool,
    random_cursor: AtomicUsize,
    pub lookups: AtomicUsize,
}

impl FakeProvider {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            failing: AtomicBool::new(false),
            random_cursor: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Status {
                status: 503,
                body: "upstream down".to_string(),
            });
        }
        Ok(())
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Recipe) -> Option<&String>,
    {
        self.recipes
            .iter()
            .filter_map(field)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, ProviderError> {
        self.check()?;
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Recipe>, ProviderError> {
        self.check()?;
        let term = term.to_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn filter_by(
        &self,
        kind: FilterKind,
        value: &str,
    ) -> Result<Vec<RecipeSummary>, ProviderError> {
        self.check()?;
        let matches = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(value))
        };
        Ok(self
            .recipes
            .iter()
            .filter(|r| match kind {
                FilterKind::Category => matches(&r.category),
                FilterKind::Area => matches(&r.area),
                FilterKind::Ingredient => r.has_ingredient(value),
            })
            .map(|r| RecipeSummary {
                id: r.id.clone(),
                name: r.name.clone(),
                thumbnail: r.thumbnail.clone(),
            })
            .collect())
    }

    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<Recipe>, ProviderError> {
        self.check()?;
        let letter = letter.to_ascii_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.name.to_lowercase().starts_with(letter))
            .cloned()
            .collect())
    }

    async fn random(&self) -> Result<Option<Recipe>, ProviderError> {
        self.check()?;
        if self.recipes.is_empty() {
            return Ok(None);
        }
        let i = self.random_cursor.fetch_add(1, Ordering::SeqCst) % self.recipes.len();
        Ok(Some(self.recipes[i].clone()))
    }

    async fn list_categories(&self) -> Result<Vec<CategoryLabel>, ProviderError> {
        self.check()?;
        Ok(self
            .distinct(|r| r.category.as_ref())
            .into_iter()
            .map(|name| CategoryLabel { name })
            .collect())
    }

    async fn list_areas(&self) -> Result<Vec<AreaLabel>, ProviderError> {
        self.check()?;
        Ok(self
            .distinct(|r| r.area.as_ref())
            .into_iter()
            .map(|name| AreaLabel { name })
            .collect())
    }

    async fn list_ingredients(&self) -> Result<Vec<IngredientLabel>, ProviderError> {
        self.check()?;
        let names: BTreeSet<String> = self
            .recipes
            .iter()
            .flat_map(|r| r.ingredients.iter().map(|l| l.ingredient.clone()))
            .collect();
        Ok(names
            .into_iter()
            .map(|name| IngredientLabel {
                id: None,
                name,
                description: None,
                kind: None,
            })
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, ProviderError> {
        self.check()?;
        Ok(self
            .distinct(|r| r.category.as_ref())
            .into_iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: (i + 1).to_string(),
                thumbnail: Some(format!("https://img.test/{name}.png")),
                description: None,
                name,
            })
            .collect())
    }
}

pub fn recipe(id: &str, name: &str, category: &str, area: &str, ingredients: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: Some(format!("https://img.test/{id}.jpg")),
        category: Some(category.to_string()),
        area: Some(area.to_string()),
        instructions: Some(format!("Prepare {name}.\n\nServe.")),
        ingredients: ingredients
            .iter()
            .map(|i| IngredientLine {
                ingredient: (*i).to_string(),
                measure: "1".to_string(),
            })
            .collect(),
        tags: vec![],
        video_url: None,
        source_url: None,
    }
}

pub fn sample_catalog() -> Vec<Recipe> {
    vec![
        recipe("1", "Pancakes", "Dessert", "American", &["Egg", "Milk", "Flour"]),
        recipe("2", "Omelette", "Breakfast", "French", &["Egg", "Cheese"]),
        recipe("3", "Custard", "Dessert", "British", &["Egg", "Milk", "Sugar"]),
        recipe("4", "Milkshake", "Dessert", "American", &["Milk", "Banana"]),
        recipe("5", "Teriyaki Chicken", "Chicken", "Japanese", &["Chicken", "Soy Sauce"]),
    ]
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // One connection: every pooled connection to :memory: would be its own database.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config
}

pub async fn spawn_app(provider: Arc<FakeProvider>) -> (Router, Arc<AppState>) {
    let state = gitchen::api::create_app_state_with_provider(test_config(), provider, None)
        .await
        .expect("Failed to create app state");
    (gitchen::api::router(state.clone()).await, state)
}
