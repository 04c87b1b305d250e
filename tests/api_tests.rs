mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{FakeProvider, sample_catalog, spawn_app};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn ids(data: &Value) -> Vec<String> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(vec![]))).await;

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn test_favorites_flow() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;
    let fav = json!({"userId": "u1", "mealId": "1", "mealName": "Pancakes"});

    let (status, body) = send(&app, "POST", "/api/favorites/add", Some(fav.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, "POST", "/api/favorites/add", Some(fav)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/api/favorites/add",
        Some(json!({"userId": "u1", "mealId": "2"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/favorites/check?userId=u1&mealId=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["favorited"], true);

    let (_, body) = send(&app, "GET", "/api/favorites/check?userId=u2&mealId=1", None).await;
    assert_eq!(body["data"]["favorited"], false);

    let (status, body) = send(&app, "GET", "/api/favorites/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["mealId"], "1");
    assert_eq!(list[0]["mealName"], "Pancakes");

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/favorites/remove",
        Some(json!({"userId": "u1", "mealId": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/api/favorites/u1/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_recipes_drop_unknown_meals() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;

    for (id, name) in [("1", "Pancakes"), ("999", "Gone")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/favorites/add",
            Some(json!({"userId": "u1", "mealId": id, "mealName": name})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/favorites/u1/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Pancakes");
    assert_eq!(list[0]["image"], "https://img.test/1.jpg");

    let (status, body) = send(&app, "DELETE", "/api/favorites/clear/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["removed"], 2);
}

#[tokio::test]
async fn test_review_upsert_and_summary() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;

    let (status, first) = send(
        &app,
        "POST",
        "/api/reviews/1",
        Some(json!({"userId": "u1", "userName": "Ann", "rating": 3, "comment": "fine"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = send(
        &app,
        "PUT",
        "/api/reviews/1",
        Some(json!({"userId": "u1", "userName": "Ann", "rating": 5, "comment": "better"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["rating"], 5);

    for (user, rating) in [("u2", 3), ("u3", 4)] {
        send(
            &app,
            "POST",
            "/api/reviews/1",
            Some(json!({"userId": user, "userName": user, "rating": rating, "comment": "ok"})),
        )
        .await;
    }

    let (_, body) = send(&app, "GET", "/api/reviews/1", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/api/reviews/1/summary", None).await;
    assert_eq!(body["data"]["rating"], 4.0);
    assert_eq!(body["data"]["reviewCount"], 3);

    let (_, body) = send(&app, "GET", "/api/reviews/2/summary", None).await;
    assert_eq!(body["data"]["rating"], 0.0);
    assert_eq!(body["data"]["reviewCount"], 0);

    let (_, body) = send(&app, "GET", "/api/reviews/user/u1", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/api/reviews", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_review_validation() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;

    for payload in [
        json!({"userId": "u1", "userName": "Ann", "rating": 6, "comment": "x"}),
        json!({"userId": "u1", "userName": "Ann", "rating": 0, "comment": "x"}),
        json!({"userId": "u1", "userName": "Ann", "rating": 4, "comment": "   "}),
        json!({"userName": "Ann", "rating": 4, "comment": "x"}),
    ] {
        let (status, body) = send(&app, "POST", "/api/reviews/1", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    let (_, body) = send(&app, "GET", "/api/reviews/1", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_review_delete_requires_owner() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/reviews/1",
        Some(json!({"userId": "owner", "userName": "O", "rating": 4, "comment": "mine"})),
    )
    .await;
    let review_id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/reviews/1/{review_id}");

    let (status, _) = send(&app, "DELETE", &uri, Some(json!({"userId": "intruder"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(&app, "GET", "/api/reviews/1", None).await;
    assert_eq!(body["data"][0]["comment"], "mine");

    let (status, _) = send(&app, "DELETE", &uri, Some(json!({"userId": "owner"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &uri, Some(json!({"userId": "owner"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_detail_statuses() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (app, _) = spawn_app(provider.clone()).await;

    let (status, body) = send(&app, "GET", "/api/recipes/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Teriyaki Chicken");
    assert_eq!(body["data"]["reviewCount"], 0);

    let (status, _) = send(&app, "GET", "/api/recipes/404404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    provider.set_failing(true);
    let (status, body) = send(&app, "GET", "/api/recipes/5", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);

    // Lists degrade instead of failing.
    let (status, body) = send(&app, "GET", "/api/recipes/search?q=pan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_egg_and_milk_with_ratings() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;

    for (user, rating) in [("a", 5), ("b", 3), ("c", 4)] {
        send(
            &app,
            "POST",
            "/api/reviews/1",
            Some(json!({"userId": user, "userName": user, "rating": rating, "comment": "yum"})),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/recipes/by-ingredients?ingredients=Egg,Milk",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]), vec!["1", "3"]);
    assert_eq!(body["data"][0]["rating"], 4.0);
    assert_eq!(body["data"][0]["reviewCount"], 3);
    assert_eq!(body["data"][1]["rating"], 0.0);

    let (_, body) = send(
        &app,
        "GET",
        "/api/recipes/by-ingredients?ingredients=",
        None,
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "GET", "/api/recipes/by-ingredients", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_kinds() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;

    let (_, body) = send(&app, "GET", "/api/recipes/search?q=custard", None).await;
    assert_eq!(ids(&body["data"]), vec!["3"]);

    let (_, body) = send(&app, "GET", "/api/recipes/search?by=letter&q=m", None).await;
    assert_eq!(ids(&body["data"]), vec!["4"]);

    let (_, body) = send(&app, "GET", "/api/recipes/search?by=category&q=Dessert", None).await;
    assert_eq!(ids(&body["data"]), vec!["1", "3", "4"]);

    let (_, body) = send(&app, "GET", "/api/recipes/search?by=area&q=American", None).await;
    assert_eq!(ids(&body["data"]), vec!["1", "4"]);

    let (status, _) = send(&app, "GET", "/api/recipes/search?by=colour&q=red", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/recipes/search?q=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_random_and_recommendations() {
    let (app, _) = spawn_app(Arc::new(FakeProvider::new(sample_catalog()))).await;

    let (status, body) = send(&app, "GET", "/api/recipes/random?count=8", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]), vec!["1", "2", "3", "4", "5"]);

    let (status, _) = send(&app, "GET", "/api/recipes/random?count=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/recipes/1/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    // Dessert: 1, 3, 4; American: 1, 4. Current recipe excluded.
    assert_eq!(ids(&body["data"]), vec!["3", "4"]);

    let (_, body) = send(&app, "GET", "/api/recipes/1/recommendations?limit=1", None).await;
    assert_eq!(ids(&body["data"]), vec!["3"]);
}

#[tokio::test]
async fn test_catalog() {
    let provider = Arc::new(FakeProvider::new(sample_catalog()));
    let (app, _) = spawn_app(provider.clone()).await;

    let (status, body) = send(&app, "GET", "/api/catalog/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/api/catalog/areas", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (_, body) = send(&app, "GET", "/api/catalog/ingredients", None).await;
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i["name"] == "Soy Sauce")
    );

    let (_, body) = send(&app, "GET", "/api/catalog/category-previews", None).await;
    assert_eq!(body["data"][0]["name"], "Breakfast");

    provider.set_failing(true);
    let (status, _) = send(&app, "GET", "/api/catalog/areas", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
