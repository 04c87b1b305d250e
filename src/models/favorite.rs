use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub user_id: String,
    pub meal_id: String,
    pub meal_name: String,
    pub added_at: String,
}

/// A favorite joined with the provider's current view of the recipe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecipe {
    #[serde(flatten)]
    pub favorite: Favorite,
    pub title: String,
    pub image: Option<String>,
}
