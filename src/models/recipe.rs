use serde::{Deserialize, Serialize};

/// Maximum number of ingredient/measure slots a provider record carries.
pub const MAX_INGREDIENTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub video_url: Option<String>,
    pub source_url: Option<String>,
}

impl Recipe {
    /// True when one of the ingredient lines names `ingredient` (case-insensitive).
    #[must_use]
    pub fn has_ingredient(&self, ingredient: &str) -> bool {
        let wanted = ingredient.trim();
        self.ingredients
            .iter()
            .any(|line| line.ingredient.eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient: String,
    pub measure: String,
}

/// Partial record returned by the provider's filter endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
}

/// A recipe decorated with its aggregate review data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub rating: f64,
    pub review_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaLabel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLabel {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
}

/// Category preview as served by the provider's category catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_with(ingredients: &[&str]) -> Recipe {
        Recipe {
            id: "1".to_string(),
            name: "Pancakes".to_string(),
            thumbnail: None,
            category: None,
            area: None,
            instructions: None,
            ingredients: ingredients
                .iter()
                .map(|i| IngredientLine {
                    ingredient: (*i).to_string(),
                    measure: String::new(),
                })
                .collect(),
            tags: vec![],
            video_url: None,
            source_url: None,
        }
    }

    #[test]
    fn test_has_ingredient_ignores_case() {
        let recipe = recipe_with(&["Eggs", "Milk"]);
        assert!(recipe.has_ingredient("eggs"));
        assert!(recipe.has_ingredient(" MILK "));
        assert!(!recipe.has_ingredient("flour"));
    }

    #[test]
    fn test_rated_recipe_flattens_recipe_fields() {
        let rated = RatedRecipe {
            recipe: recipe_with(&["Eggs"]),
            rating: 4.5,
            review_count: 2,
        };

        let json = serde_json::to_value(&rated).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["name"], "Pancakes");
        assert_eq!(json["rating"], 4.5);
        assert_eq!(json["reviewCount"], 2);
    }
}
