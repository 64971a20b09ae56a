use axum::extract::State;
use chrono::Utc;
use models::{
    Ingredient, IngredientCreate, IngredientQuery, IngredientUpdate, List, Message, PantryItem,
    RecipeIngredient,
};
use tracing::info;
use uuid::Uuid;

use super::SharedState;
use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::{Json, Path, Query},
    search::search_page,
};

pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<IngredientQuery>,
) -> Result<Json<List<Ingredient>>, AppError> {
    query.validate()?;

    let ingredients = state.store.all::<Ingredient>().await?;

    Ok(Json(search_page(ingredients, query.needle(), query.page())))
}

pub async fn read(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ingredient>, AppError> {
    state
        .store
        .find::<Ingredient>(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Ingredient"))
}

pub async fn create(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Json(payload): Json<IngredientCreate>,
) -> Result<Json<Ingredient>, AppError> {
    payload.validate()?;

    let ingredient = payload.into_ingredient(Uuid::new_v4(), Utc::now());
    state.store.put(&ingredient).await?;

    info!(id = %ingredient.id, name = %ingredient.name, "Ingredient created");
    Ok(Json(ingredient))
}

pub async fn update(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<IngredientUpdate>,
) -> Result<Json<Ingredient>, AppError> {
    payload.validate()?;

    let mut ingredient = state
        .store
        .find::<Ingredient>(id)
        .await?
        .ok_or(AppError::NotFound("Ingredient"))?;

    payload.apply(&mut ingredient);
    state.store.put(&ingredient).await?;

    Ok(Json(ingredient))
}

/// Also removes the pantry items and recipe lines that use the ingredient.
pub async fn delete(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    if state.store.find::<Ingredient>(id).await?.is_none() {
        return Err(AppError::NotFound("Ingredient"));
    }

    let mut cascaded = 0;

    for item in state.store.all::<PantryItem>().await? {
        if item.ingredient_id == id {
            state.store.remove::<PantryItem>(item.id).await?;
            cascaded += 1;
        }
    }

    for link in state.store.all::<RecipeIngredient>().await? {
        if link.ingredient_id == id {
            state.store.remove::<RecipeIngredient>(link.id).await?;
            cascaded += 1;
        }
    }

    state.store.remove::<Ingredient>(id).await?;

    info!(%id, cascaded, "Ingredient deleted");
    Ok(Json(Message::new("Ingredient deleted successfully")))
}
