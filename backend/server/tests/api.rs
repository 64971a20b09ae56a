use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Method, Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use chrono::{Days, Local};
use serde_json::{Value, json};
use server::{app, config::Config, state::State, store::Store};
use tower::ServiceExt;
use uuid::Uuid;

const ADMIN_TOKEN: &str = "admin-token";

async fn setup() -> Router {
    let config = Config {
        admin_token: Some(ADMIN_TOKEN.to_string()),
        ..Config::default()
    };
    let state = State::with_store(config, Store::memory()).await.unwrap();

    app(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_user(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/users",
        Some(ADMIN_TOKEN),
        Some(json!({ "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    body["token"].as_str().unwrap().to_string()
}

async fn user_id(app: &Router, token: &str) -> String {
    let (status, body) = send(app, Method::GET, "/api/v1/users/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    body["id"].as_str().unwrap().to_string()
}

async fn create_ingredient(app: &Router, token: &str, name: &str, category: Option<&str>) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/ingredients",
        Some(token),
        Some(json!({ "name": name, "category": category })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    body["id"].as_str().unwrap().to_string()
}

async fn create_recipe(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/recipes",
        Some(token),
        Some(json!({ "name": name, "prep_time_minutes": 10, "servings": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    body["id"].as_str().unwrap().to_string()
}

async fn add_to_recipe(app: &Router, token: &str, recipe: &str, ingredient: &str, amount: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/recipe-ingredients",
        Some(token),
        Some(json!({ "recipe_id": recipe, "ingredient_id": ingredient, "amount": amount })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    body["id"].as_str().unwrap().to_string()
}

async fn stock(app: &Router, token: &str, ingredient: &str, amount: &str, expires: Option<String>) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/user-ingredients",
        Some(token),
        Some(json!({ "ingredient_id": ingredient, "amount": amount, "expiration_date": expires })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    body["id"].as_str().unwrap().to_string()
}

fn days_from_today(days: i64) -> String {
    let today = Local::now().date_naive();
    let date = if days >= 0 {
        today + Days::new(days as u64)
    } else {
        today - Days::new(days.unsigned_abs())
    };

    date.format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn health_check() {
    let app = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/utils/health-check", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));
}

#[tokio::test]
async fn authentication_errors() {
    let app = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Not authenticated");

    let (status, body) = send(&app, Method::GET, "/api/v1/users/me", Some("nope"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Could not validate credentials");

    let (status, body) = send(&app, Method::GET, "/api/v1/users/me", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "admin@example.com");
    assert_eq!(body["is_superuser"], true);
}

#[tokio::test]
async fn only_superusers_manage_users() {
    let app = setup().await;
    let cook = create_user(&app, "cook@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/v1/users/me", Some(&cook), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "cook@example.com");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(&cook),
        Some(json!({ "email": "other@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(ADMIN_TOKEN),
        Some(json!({ "email": "COOK@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "The user with this email already exists in the system."
    );

    let (status, body) = send(&app, Method::GET, "/api/v1/users?search=cook", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn ingredient_catalog() {
    let app = setup().await;
    let cook = create_user(&app, "cook@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/ingredients",
        None,
        Some(json!({ "name": "Salt" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    create_ingredient(&app, &cook, "Basil", Some("Herbs")).await;
    create_ingredient(&app, &cook, "Thyme", Some("Herbs")).await;
    let rice = create_ingredient(&app, &cook, "Rice", None).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/ingredients?search=herb&limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Basil");
    assert_eq!(body["data"][0]["unit"], "grams");

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/ingredients/{rice}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], Value::Null);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/ingredients/{rice}"),
        Some(&cook),
        Some(json!({ "unit": "cups", "category": "Grains" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Rice");
    assert_eq!(body["unit"], "cups");
    assert_eq!(body["category"], "Grains");
}

#[tokio::test]
async fn request_validation() {
    let app = setup().await;

    let (status, _) = send(&app, Method::GET, "/api/v1/ingredients?limit=101", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::GET, "/api/v1/ingredients/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/ingredients/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Ingredient not found");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/ingredients",
        Some(ADMIN_TOKEN),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().starts_with("name"));

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/user-ingredients?days_ahead=31",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/recipes/suggestions?min_match_score=2",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn recipes_belong_to_their_owner() {
    let app = setup().await;
    let alice = create_user(&app, "alice@example.com").await;
    let bob = create_user(&app, "bob@example.com").await;

    let soup = create_recipe(&app, &alice, "Tomato soup").await;
    create_recipe(&app, &bob, "Bob's stew").await;

    let (status, body) = send(&app, Method::GET, "/api/v1/recipes", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Tomato soup");

    let uri = format!("/api/v1/recipes/{soup}");

    let (status, body) = send(&app, Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Not enough permissions");

    let (status, _) = send(&app, Method::GET, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&alice),
        Some(json!({ "cuisine": "Italian", "prep_time_minutes": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cuisine"], "Italian");
    assert_eq!(body["prep_time_minutes"], Value::Null);
    assert_eq!(body["servings"], 2);

    let (status, body) = send(&app, Method::GET, "/api/v1/recipes?search=italian", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recipe deleted successfully");

    let (status, _) = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recipe_ingredient_links() {
    let app = setup().await;
    let alice = create_user(&app, "alice@example.com").await;
    let bob = create_user(&app, "bob@example.com").await;

    let flour = create_ingredient(&app, &alice, "Flour", None).await;
    let bread = create_recipe(&app, &alice, "Bread").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/recipe-ingredients",
        Some(&alice),
        Some(json!({ "recipe_id": bread, "ingredient_id": Uuid::new_v4(), "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Ingredient not found");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/recipe-ingredients",
        Some(&bob),
        Some(json!({ "recipe_id": bread, "ingredient_id": flour, "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/recipe-ingredients",
        Some(&alice),
        Some(json!({ "recipe_id": bread, "ingredient_id": flour, "amount": -2 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    add_to_recipe(&app, &alice, &bread, &flour, "500").await;

    let (status, _) = send(&app, Method::GET, "/api/v1/recipe-ingredients", Some(&alice), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let uri = format!("/api/v1/recipe-ingredients?recipe_id={bread}");
    let (status, body) = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["amount"], "500.00");
    assert_eq!(body["data"][0]["ingredient"]["name"], "Flour");

    let (status, _) = send(&app, Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let link = body["data"][0]["id"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/recipe-ingredients/{link}"),
        Some(&alice),
        Some(json!({ "amount": "450.5", "notes": "sifted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "450.50");
    assert_eq!(body["notes"], "sifted");

    // deleting the recipe takes its lines with it
    send(&app, Method::DELETE, &format!("/api/v1/recipes/{bread}"), Some(&alice), None).await;
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/recipe-ingredients/{link}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Recipe ingredient not found");
}

#[tokio::test]
async fn pantry_items() {
    let app = setup().await;
    let alice = create_user(&app, "alice@example.com").await;
    let bob = create_user(&app, "bob@example.com").await;

    let milk = create_ingredient(&app, &alice, "Milk", Some("Dairy")).await;
    let rice = create_ingredient(&app, &alice, "Rice", None).await;

    let milk_item = stock(&app, &alice, &milk, "1", Some(days_from_today(3))).await;
    stock(&app, &alice, &rice, "2", None).await;
    stock(&app, &alice, &milk, "1", Some(days_from_today(-2))).await;
    stock(&app, &alice, &rice, "1", Some(days_from_today(20))).await;
    stock(&app, &bob, &rice, "5", Some(days_from_today(1))).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/user-ingredients", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
    assert_eq!(body["data"][0]["ingredient"]["name"], "Milk");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/user-ingredients?expiring_soon=true",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/user-ingredients?expiring_soon=true&days_ahead=30",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(body["count"], 3);

    let uri = format!("/api/v1/user-ingredients/{milk_item}");
    let (status, body) = send(&app, Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Not enough permissions");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&alice),
        Some(json!({ "expiration_date": null, "amount": 0.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expiration_date"], Value::Null);
    assert_eq!(body["amount"], "0.50");

    // deleting an ingredient removes it from every pantry
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/ingredients/{rice}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ingredient deleted successfully");

    let (_, body) = send(&app, Method::GET, "/api/v1/user-ingredients", Some(&bob), None).await;
    assert_eq!(body["count"], 0);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn suggestions_rank_the_catalog() {
    let app = setup().await;
    let alice = create_user(&app, "alice@example.com").await;
    let bob = create_user(&app, "bob@example.com").await;

    let egg = create_ingredient(&app, &alice, "Egg", None).await;
    let milk = create_ingredient(&app, &alice, "Milk", None).await;
    let flour = create_ingredient(&app, &alice, "Flour", None).await;
    let saffron = create_ingredient(&app, &alice, "Saffron", None).await;

    let omelette = create_recipe(&app, &alice, "Omelette").await;
    add_to_recipe(&app, &alice, &omelette, &egg, "3").await;
    add_to_recipe(&app, &alice, &omelette, &milk, "50").await;

    // someone else's recipe is still suggested
    let pancakes = create_recipe(&app, &bob, "Pancakes").await;
    add_to_recipe(&app, &bob, &pancakes, &egg, "2").await;
    add_to_recipe(&app, &bob, &pancakes, &milk, "250").await;
    add_to_recipe(&app, &bob, &pancakes, &flour, "200").await;

    let paella = create_recipe(&app, &bob, "Paella").await;
    add_to_recipe(&app, &bob, &paella, &saffron, "1").await;
    add_to_recipe(&app, &bob, &paella, &flour, "1").await;
    add_to_recipe(&app, &bob, &paella, &milk, "1").await;
    add_to_recipe(&app, &bob, &paella, &egg, "1").await;

    create_recipe(&app, &alice, "Empty").await;

    stock(&app, &alice, &egg, "6", None).await;
    stock(&app, &alice, &milk, "100", Some(days_from_today(2))).await;
    stock(&app, &alice, &flour, "500", Some(days_from_today(-1))).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/recipes/suggestions", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["recipe"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Omelette", "Pancakes", "Paella"]);
    assert_eq!(body["count"], 3);

    let omelette = &body["data"][0];
    assert_eq!(omelette["match_score"], 1.0);
    assert_eq!(omelette["available_count"], 2);
    assert_eq!(omelette["total_ingredients"], 2);
    assert_eq!(omelette["recipe"]["recipe_ingredients"].as_array().unwrap().len(), 2);

    let pancakes = &body["data"][1];
    assert_eq!(pancakes["missing_ingredients"][0]["ingredient"]["name"], "Flour");

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/recipes/suggestions?min_match_score=0.6&limit=1",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["recipe"]["name"], "Omelette");

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/recipes/suggestions?require_amount=true&min_match_score=0",
        Some(&alice),
        None,
    )
    .await;
    let pancakes = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["recipe"]["name"] == "Pancakes")
        .unwrap();
    assert_eq!(pancakes["available_count"], 1);

    let (status, body) = send(&app, Method::GET, "/api/v1/recipes/suggestions", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn deleting_an_ingredient_drops_recipe_lines() {
    let app = setup().await;
    let alice = create_user(&app, "alice@example.com").await;

    let flour = create_ingredient(&app, &alice, "Flour", None).await;
    let salt = create_ingredient(&app, &alice, "Salt", None).await;
    let bread = create_recipe(&app, &alice, "Bread").await;
    add_to_recipe(&app, &alice, &bread, &flour, "500").await;
    let salt_line = add_to_recipe(&app, &alice, &bread, &salt, "10").await;
    stock(&app, &alice, &flour, "1000", None).await;

    let (_, body) = send(&app, Method::GET, "/api/v1/recipes/suggestions", Some(&alice), None).await;
    assert_eq!(body["data"][0]["total_ingredients"], 2);
    assert_eq!(body["data"][0]["match_score"], 0.5);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/ingredients/{salt}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/recipe-ingredients/{salt_line}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/v1/recipes/suggestions", Some(&alice), None).await;
    assert_eq!(body["data"][0]["total_ingredients"], 1);
    assert_eq!(body["data"][0]["match_score"], 1.0);
    assert_eq!(body["data"][0]["recipe"]["recipe_ingredients"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn account_updates_and_deactivation() {
    let app = setup().await;
    let cook = create_user(&app, "cook@example.com").await;
    let cook_id = user_id(&app, &cook).await;
    let admin_id = user_id(&app, ADMIN_TOKEN).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/users/me",
        Some(&cook),
        Some(json!({ "full_name": "Head Cook", "email": "Chef@Example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["email"], "chef@example.com");
    assert_eq!(body["full_name"], "Head Cook");
    assert_eq!(body["is_superuser"], false);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/users/me",
        Some(&cook),
        Some(json!({ "email": "admin@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "The user with this email already exists in the system."
    );

    // the old address is free again
    create_user(&app, "cook@example.com").await;

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/users/{cook_id}"), Some(&cook), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/users/{admin_id}"), Some(&cook), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/v1/users/{cook_id}");
    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&cook),
        Some(json!({ "is_superuser": true })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(ADMIN_TOKEN),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (status, body) = send(&app, Method::GET, "/api/v1/users/me", Some(&cook), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Inactive user");

    send(
        &app,
        Method::PATCH,
        &uri,
        Some(ADMIN_TOKEN),
        Some(json!({ "is_active": true })),
    )
    .await;
    let (status, _) = send(&app, Method::GET, "/api/v1/users/me", Some(&cook), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/users/{}", Uuid::new_v4()),
        Some(ADMIN_TOKEN),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_user_removes_their_data() {
    let app = setup().await;
    let alice = create_user(&app, "alice@example.com").await;
    let alice_id = user_id(&app, &alice).await;
    let admin_id = user_id(&app, ADMIN_TOKEN).await;

    let rice = create_ingredient(&app, &alice, "Rice", None).await;
    let recipe = create_recipe(&app, &alice, "Risotto").await;
    let line = add_to_recipe(&app, &alice, &recipe, &rice, "300").await;
    let item = stock(&app, &alice, &rice, "1000", None).await;

    let uri = format!("/api/v1/users/{alice_id}");
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/users/{admin_id}"),
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Super users are not allowed to delete themselves");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (status, _) = send(&app, Method::GET, "/api/v1/users/me", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for gone in [
        format!("/api/v1/recipes/{recipe}"),
        format!("/api/v1/recipe-ingredients/{line}"),
        format!("/api/v1/user-ingredients/{item}"),
        uri.clone(),
    ] {
        let (status, _) = send(&app, Method::GET, &gone, Some(ADMIN_TOKEN), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{gone}");
    }

    // the shared catalog keeps the ingredient
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/ingredients/{rice}"), None, None).await;
    assert_eq!(status, StatusCode::OK);

    create_user(&app, "alice@example.com").await;
}
