mod common;

use common::{FakeProvider, recipe, sample_catalog};
use gitchen::db::Store;
use gitchen::domain::SearchCriteria;
use gitchen::models::favorite::Favorite;
use gitchen::services::{ReviewService, ReviewSubmission, SeaOrmReviewService, SearchService};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::Ordering;

async fn engine(provider: Arc<FakeProvider>) -> (SearchService, Arc<SeaOrmReviewService>) {
    let store = Store::in_memory().await.unwrap();
    let reviews = Arc::new(SeaOrmReviewService::new(store));
    (SearchService::new(provider, reviews.clone()), reviews)
}

fn ids(recipes: &[gitchen::models::recipe::RatedRecipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.recipe.id.as_str()).collect()
}

fn set(items: &[&str]) -> SearchCriteria {
    SearchCriteria::ByIngredientSet(items.iter().map(ToString::to_string).collect())
}

#[tokio::test]
async fn test_ingredient_set_returns_only_recipes_with_all() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (engine, _) = engine(provider).await;

    let results = engine.search(&set(&["Egg", "Milk"])).await;
    assert_eq!(ids(&results), vec!["1", "3"]);
    for r in &results {
        assert!(r.recipe.has_ingredient("egg"));
        assert!(r.recipe.has_ingredient("milk"));
    }

    let single = engine.search(&set(&["Cheese"])).await;
    assert_eq!(ids(&single), vec!["2"]);

    let none = engine.search(&set(&["Cheese", "Banana"])).await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_empty_ingredient_set_makes_no_calls() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (engine, _) = engine(provider.clone()).await;

    let results = engine
        .search(&SearchCriteria::ByIngredientSet(BTreeSet::new()))
        .await;
    assert!(results.is_empty());
    assert_eq!(provider.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_results_are_decorated_with_ratings() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (engine, reviews) = engine(provider).await;

    for (user, rating) in [("a", 5), ("b", 3), ("c", 4)] {
        reviews
            .upsert(
                "1",
                ReviewSubmission {
                    user_id: Some(user.to_string()),
                    user_name: Some(user.to_string()),
                    rating: Some(rating),
                    comment: Some("good".to_string()),
                },
            )
            .await
            .unwrap();
    }

    let results = engine.search(&set(&["Egg", "Milk"])).await;
    let pancakes = &results[0];
    assert!((pancakes.rating - 4.0).abs() < f64::EPSILON);
    assert_eq!(pancakes.review_count, 3);

    let custard = &results[1];
    assert!(custard.rating.abs() < f64::EPSILON);
    assert_eq!(custard.review_count, 0);
}

#[tokio::test]
async fn test_filters_drop_ids_the_provider_no_longer_knows() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (engine, _) = engine(provider).await;

    let results = engine
        .search(&SearchCriteria::ByIngredient("Chicken".to_string()))
        .await;
    assert_eq!(ids(&results), vec!["5"]);

    let missing = engine.lookup_many(&["5".to_string(), "404".to_string()]).await.unwrap();
    assert_eq!(missing.len(), 1);
}

#[tokio::test]
async fn test_random_sample_deduplicates_keeping_first() {
    let provider = Arc::new(FakeProvider::new(vec![
        recipe("a", "A", "X", "Y", &["Salt"]),
        recipe("b", "B", "X", "Y", &["Salt"]),
    ]));
    let (engine, _) = engine(provider).await;

    let results = engine.search(&SearchCriteria::RandomSample(5)).await;
    assert_eq!(ids(&results), vec!["a", "b"]);

    assert!(engine.search(&SearchCriteria::RandomSample(0)).await.is_empty());
}

#[tokio::test]
async fn test_failures_degrade_to_empty() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (engine, _) = engine(provider.clone()).await;
    provider.set_failing(true);

    assert!(engine.search(&set(&["Egg", "Milk"])).await.is_empty());
    assert!(
        engine
            .search(&SearchCriteria::ByName("Pancakes".to_string()))
            .await
            .is_empty()
    );
    assert!(
        engine
            .recommend(Some("Dessert"), Some("American"), "1", 6)
            .await
            .is_empty()
    );
    assert!(engine.lookup_recipe("1").await.is_err());
}

#[tokio::test]
async fn test_recommendations_exclude_current_and_respect_limit() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (engine, _) = engine(provider).await;

    let results = engine.recommend(Some("Dessert"), Some("French"), "3", 6).await;
    assert_eq!(ids(&results), vec!["1", "4", "2"]);

    let limited = engine.recommend(Some("Dessert"), None, "3", 1).await;
    assert_eq!(ids(&limited), vec!["1"]);

    assert!(engine.recommend(None, None, "3", 6).await.is_empty());
}

#[tokio::test]
async fn test_favorite_recipes_skip_unresolved() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (engine, _) = engine(provider).await;

    let favorite = |meal_id: &str| Favorite {
        user_id: "u1".to_string(),
        meal_id: meal_id.to_string(),
        meal_name: "saved".to_string(),
        added_at: "2026-01-01T00:00:00Z".to_string(),
    };

    let joined = engine
        .favorite_recipes(vec![favorite("2"), favorite("gone"), favorite("4")])
        .await;
    let titles: Vec<&str> = joined.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Omelette", "Milkshake"]);
}
