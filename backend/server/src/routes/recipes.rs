use axum::extract::State;
use chrono::Utc;
use models::{
    List, Message, PantryItem, Recipe, RecipeCreate, RecipeIngredient, RecipeQuery,
    RecipeSuggestion, RecipeUpdate, SuggestionQuery,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::SharedState;
use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::{Json, Path, Query},
    search::search_page,
    store::Store,
    suggest::rank,
    utils::{attach_ingredients, catalog, today},
};

async fn owned_recipe(store: &Store, user: &CurrentUser, id: Uuid) -> Result<Recipe, AppError> {
    let recipe = store
        .find::<Recipe>(id)
        .await?
        .ok_or(AppError::NotFound("Recipe"))?;

    user.ensure_owner(recipe.owner_id)?;
    Ok(recipe)
}

/// The caller's own recipes.
pub async fn list(
    State(state): State<SharedState>,
    user: CurrentUser,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<List<Recipe>>, AppError> {
    query.validate()?;

    let recipes: Vec<Recipe> = state
        .store
        .all::<Recipe>()
        .await?
        .into_iter()
        .filter(|recipe| recipe.owner_id == user.id())
        .collect();

    Ok(Json(search_page(recipes, query.needle(), query.page())))
}

/// Ranks every recipe in the catalog against the caller's pantry.
pub async fn suggestions(
    State(state): State<SharedState>,
    user: CurrentUser,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<List<RecipeSuggestion>>, AppError> {
    query.validate()?;

    let recipes = state.store.all::<Recipe>().await?;
    let mut links = state.store.all::<RecipeIngredient>().await?;
    let pantry: Vec<PantryItem> = state
        .store
        .all::<PantryItem>()
        .await?
        .into_iter()
        .filter(|item| item.user_id == user.id())
        .collect();

    attach_ingredients(&mut links, &catalog(&state.store).await?);

    let considered = recipes.len();
    let data = rank(recipes, links, &pantry, &query, today());

    debug!(
        user = %user.id(),
        considered,
        suggested = data.len(),
        "Ranked recipe suggestions"
    );

    Ok(Json(List {
        count: data.len(),
        data,
    }))
}

pub async fn read(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    owned_recipe(&state.store, &user, id).await.map(Json)
}

pub async fn create(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(payload): Json<RecipeCreate>,
) -> Result<Json<Recipe>, AppError> {
    payload.validate()?;

    let recipe = payload.into_recipe(Uuid::new_v4(), user.id(), Utc::now());
    state.store.put(&recipe).await?;

    info!(id = %recipe.id, owner = %recipe.owner_id, "Recipe created");
    Ok(Json(recipe))
}

pub async fn update(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecipeUpdate>,
) -> Result<Json<Recipe>, AppError> {
    payload.validate()?;

    let mut recipe = owned_recipe(&state.store, &user, id).await?;
    payload.apply(&mut recipe);
    state.store.put(&recipe).await?;

    Ok(Json(recipe))
}

/// Also removes the recipe's ingredient lines.
pub async fn delete(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    owned_recipe(&state.store, &user, id).await?;

    for link in state.store.all::<RecipeIngredient>().await? {
        if link.recipe_id == id {
            state.store.remove::<RecipeIngredient>(link.id).await?;
        }
    }

    if !state.store.remove::<Recipe>(id).await? {
        return Err(AppError::NotFound("Recipe"));
    }

    info!(%id, "Recipe deleted");
    Ok(Json(Message::new("Recipe deleted successfully")))
}
