use axum::extract::State;
use chrono::Utc;
use models::{
    List, Message, Recipe, RecipeIngredient, RecipeIngredientCreate, RecipeIngredientQuery,
    RecipeIngredientUpdate,
};
use tracing::info;
use uuid::Uuid;

use super::SharedState;
use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::{Json, Path, Query},
    search::paginate,
    store::Store,
    utils::{attach_ingredient, attach_ingredients, catalog, ensure_ingredient_exists},
};

/// Recipe must exist and belong to the caller (superusers pass).
async fn check_recipe(store: &Store, user: &CurrentUser, recipe_id: Uuid) -> Result<(), AppError> {
    let recipe = store
        .find::<Recipe>(recipe_id)
        .await?
        .ok_or(AppError::NotFound("Recipe"))?;

    user.ensure_owner(recipe.owner_id)
}

async fn owned_link(
    store: &Store,
    user: &CurrentUser,
    id: Uuid,
) -> Result<RecipeIngredient, AppError> {
    let link = store
        .find::<RecipeIngredient>(id)
        .await?
        .ok_or(AppError::NotFound("Recipe ingredient"))?;

    check_recipe(store, user, link.recipe_id).await?;
    Ok(link)
}

pub async fn list(
    State(state): State<SharedState>,
    user: CurrentUser,
    Query(query): Query<RecipeIngredientQuery>,
) -> Result<Json<List<RecipeIngredient>>, AppError> {
    query.validate()?;
    check_recipe(&state.store, &user, query.recipe_id).await?;

    let links: Vec<RecipeIngredient> = state
        .store
        .all::<RecipeIngredient>()
        .await?
        .into_iter()
        .filter(|link| link.recipe_id == query.recipe_id)
        .collect();

    let mut list = paginate(links, query.page());
    attach_ingredients(&mut list.data, &catalog(&state.store).await?);

    Ok(Json(list))
}

pub async fn read(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeIngredient>, AppError> {
    let link = owned_link(&state.store, &user, id).await?;

    attach_ingredient(&state.store, link).await.map(Json)
}

pub async fn create(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(payload): Json<RecipeIngredientCreate>,
) -> Result<Json<RecipeIngredient>, AppError> {
    payload.validate()?;
    check_recipe(&state.store, &user, payload.recipe_id).await?;
    ensure_ingredient_exists(&state.store, payload.ingredient_id).await?;

    let link = payload.into_recipe_ingredient(Uuid::new_v4(), Utc::now());
    state.store.put(&link).await?;

    info!(id = %link.id, recipe = %link.recipe_id, "Recipe ingredient created");
    attach_ingredient(&state.store, link).await.map(Json)
}

pub async fn update(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecipeIngredientUpdate>,
) -> Result<Json<RecipeIngredient>, AppError> {
    payload.validate()?;

    let mut link = owned_link(&state.store, &user, id).await?;

    if let Some(recipe_id) = payload.recipe_id.filter(|target| *target != link.recipe_id) {
        check_recipe(&state.store, &user, recipe_id).await?;
    }
    if let Some(ingredient_id) = payload.ingredient_id {
        ensure_ingredient_exists(&state.store, ingredient_id).await?;
    }

    payload.apply(&mut link);
    state.store.put(&link).await?;

    attach_ingredient(&state.store, link).await.map(Json)
}

pub async fn delete(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    owned_link(&state.store, &user, id).await?;

    if !state.store.remove::<RecipeIngredient>(id).await? {
        return Err(AppError::NotFound("Recipe ingredient"));
    }

    Ok(Json(Message::new("Recipe ingredient deleted successfully")))
}
