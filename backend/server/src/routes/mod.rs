use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::{extract::Json, state::State};

pub mod ingredients;
pub mod pantry;
pub mod recipe_ingredients;
pub mod recipes;
pub mod users;

pub type SharedState = Arc<State>;

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/utils/health-check", get(health_check))
        .route("/users", get(users::list).post(users::create))
        .route("/users/me", get(users::me).patch(users::update_me))
        .route(
            "/users/:id",
            get(users::read)
                .patch(users::update)
                .delete(users::delete),
        )
        .route(
            "/ingredients",
            get(ingredients::list).post(ingredients::create),
        )
        .route(
            "/ingredients/:id",
            get(ingredients::read)
                .put(ingredients::update)
                .delete(ingredients::delete),
        )
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/suggestions", get(recipes::suggestions))
        .route(
            "/recipes/:id",
            get(recipes::read)
                .put(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/recipe-ingredients",
            get(recipe_ingredients::list).post(recipe_ingredients::create),
        )
        .route(
            "/recipe-ingredients/:id",
            get(recipe_ingredients::read)
                .put(recipe_ingredients::update)
                .delete(recipe_ingredients::delete),
        )
        .route("/user-ingredients", get(pantry::list).post(pantry::create))
        .route(
            "/user-ingredients/:id",
            get(pantry::read).put(pantry::update).delete(pantry::delete),
        )
}

pub async fn health_check() -> Json<bool> {
    Json(true)
}
