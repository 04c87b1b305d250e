pub mod mealdb;

pub use mealdb::{MealDbClient, ProviderError, RecipeProvider};
