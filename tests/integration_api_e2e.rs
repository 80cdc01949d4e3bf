//! End-to-end tests for the HTTP surface.
//!
//! These run against a live server (`cargo run`) backed by a real
//! database, so they are ignored by default:
//!
//! ```sh
//! cargo test -- --ignored
//! ```

use std::time::{SystemTime, UNIX_EPOCH};
use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static BASE_URL: Lazy<String> = Lazy::new(|| {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
});

// Shared test context; one per test so each carries its own session cookie.
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

impl TestContext {
    fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .unwrap(),
            base_url: BASE_URL.clone(),
        }
    }

    fn get_timestamp() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    }

    fn unique_email(&self) -> String {
        format!("johndoe_{}@mail.com", Self::get_timestamp())
    }

    async fn register(&self, name: &str, email: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/users", self.base_url))
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await
            .unwrap()
    }

    async fn create_meal(&self, name: &str, is_on_diet: bool, date: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/meals", self.base_url))
            .json(&json!({
                "name": name,
                "description": format!("Delicious {}", name),
                "isOnDiet": is_on_diet,
                "date": date,
            }))
            .send()
            .await
            .unwrap()
    }

    async fn list_meals(&self) -> Value {
        self.client
            .get(format!("{}/meals", self.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn registers_a_user_and_rejects_duplicate_email() {
    let context = TestContext::new();
    let email = context.unique_email();

    let first = context.register("John Doe", &email).await;
    assert_eq!(first.status().as_u16(), 201, "Registration failed");

    let second = TestContext::new().register("Jane Doe", &email).await;
    assert_eq!(second.status().as_u16(), 400);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "User already exists");

    // No second row for that email.
    let users: Value = context
        .client
        .get(format!("{}/users", context.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let matching = users["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|u| u["email"] == email.as_str())
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn rejects_invalid_registration_payloads() {
    let context = TestContext::new();

    let response = context.register("John Doe", "not-an-email").await;
    assert_eq!(response.status().as_u16(), 400);

    let response = context.register("", &context.unique_email()).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn creates_and_round_trips_a_meal() {
    let context = TestContext::new();
    context.register("John Doe", &context.unique_email()).await;

    let date = Utc::now().to_rfc3339();
    let response = context.create_meal("Pizza", false, &date).await;
    assert_eq!(response.status().as_u16(), 201);

    let meals = context.list_meals().await;
    let meal_id = meals["meals"][0]["id"].as_str().unwrap().to_string();

    let body: Value = context
        .client
        .get(format!("{}/meals/{}", context.base_url, meal_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["meal"]["name"], "Pizza");
    assert_eq!(body["meal"]["description"], "Delicious Pizza");
    assert_eq!(body["meal"]["isOnDiet"], false);
    assert!(body["meal"]["date"].is_string());
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn lists_meals_most_recent_first() {
    let context = TestContext::new();
    context.register("John Doe", &context.unique_email()).await;

    let today = Utc::now();
    let tomorrow = today + Duration::days(1);

    context
        .create_meal("Pizza", false, &today.to_rfc3339())
        .await;
    context
        .create_meal("Veggie Soup", true, &tomorrow.to_rfc3339())
        .await;

    let meals = context.list_meals().await;
    let meals = meals["meals"].as_array().unwrap();

    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0]["name"], "Veggie Soup");
    assert_eq!(meals[1]["name"], "Pizza");
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn updates_and_deletes_an_owned_meal() {
    let context = TestContext::new();
    context.register("John Doe", &context.unique_email()).await;

    context
        .create_meal("Pizza", false, &Utc::now().to_rfc3339())
        .await;
    let meals = context.list_meals().await;
    let meal_id = meals["meals"][0]["id"].as_str().unwrap().to_string();

    let update = context
        .client
        .put(format!("{}/meals/{}", context.base_url, meal_id))
        .json(&json!({
            "name": "Salad",
            "description": "Green Salad",
            "isOnDiet": true,
            "date": Utc::now().to_rfc3339(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status().as_u16(), 204);

    let body: Value = context
        .client
        .get(format!("{}/meals/{}", context.base_url, meal_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["meal"]["name"], "Salad");
    assert_eq!(body["meal"]["isOnDiet"], true);

    let delete = context
        .client
        .delete(format!("{}/meals/{}", context.base_url, meal_id))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status().as_u16(), 204);

    let gone = context
        .client
        .get(format!("{}/meals/{}", context.base_url, meal_id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn hides_meals_from_other_sessions() {
    let owner = TestContext::new();
    owner.register("John Doe", &owner.unique_email()).await;
    owner
        .create_meal("Pizza", false, &Utc::now().to_rfc3339())
        .await;

    let meals = owner.list_meals().await;
    let meal_id = meals["meals"][0]["id"].as_str().unwrap().to_string();

    let intruder = TestContext::new();
    intruder
        .register("Jane Doe", &intruder.unique_email())
        .await;

    let get = intruder
        .client
        .get(format!("{}/meals/{}", intruder.base_url, meal_id))
        .send()
        .await
        .unwrap();
    assert_eq!(get.status().as_u16(), 404);

    let update = intruder
        .client
        .put(format!("{}/meals/{}", intruder.base_url, meal_id))
        .json(&json!({
            "name": "Hijacked",
            "description": "Hijacked",
            "isOnDiet": true,
            "date": Utc::now().to_rfc3339(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status().as_u16(), 404);

    let delete = intruder
        .client
        .delete(format!("{}/meals/{}", intruder.base_url, meal_id))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status().as_u16(), 404);

    // Still there for the owner.
    let get = owner
        .client
        .get(format!("{}/meals/{}", owner.base_url, meal_id))
        .send()
        .await
        .unwrap();
    assert_eq!(get.status().as_u16(), 200);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn computes_metrics_for_a_session() {
    let context = TestContext::new();
    context.register("John Doe", &context.unique_email()).await;

    let start = Utc::now();
    let flags = [false, true, false, true, true];
    for (i, on_diet) in flags.iter().enumerate() {
        let date = (start + Duration::hours(i as i64)).to_rfc3339();
        context
            .create_meal(&format!("Meal {}", i), *on_diet, &date)
            .await;
    }

    let metrics: Value = context
        .client
        .get(format!("{}/meals/metrics", context.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(metrics["totalMeals"], 5);
    assert_eq!(metrics["totalMealsOnDiet"], 3);
    assert_eq!(metrics["totalMealsOffDiet"], 2);
    assert_eq!(metrics["bestOnDietStreak"], 2);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn fresh_session_has_zero_metrics_and_no_meals() {
    let context = TestContext::new();

    let meals = context.list_meals().await;
    assert_eq!(meals["meals"].as_array().unwrap().len(), 0);

    let metrics: Value = context
        .client
        .get(format!("{}/meals/metrics", context.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(metrics["totalMeals"], 0);
    assert_eq!(metrics["totalMealsOnDiet"], 0);
    assert_eq!(metrics["totalMealsOffDiet"], 0);
    assert_eq!(metrics["bestOnDietStreak"], 0);
}
