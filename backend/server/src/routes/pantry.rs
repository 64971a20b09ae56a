use axum::extract::State;
use chrono::Utc;
use models::{List, Message, PantryItem, PantryItemCreate, PantryItemUpdate, PantryQuery};
use tracing::info;
use uuid::Uuid;

use super::SharedState;
use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::{Json, Path, Query},
    search::paginate,
    store::Store,
    utils::{attach_ingredient, attach_ingredients, catalog, ensure_ingredient_exists, today},
};

async fn owned_item(store: &Store, user: &CurrentUser, id: Uuid) -> Result<PantryItem, AppError> {
    let item = store
        .find::<PantryItem>(id)
        .await?
        .ok_or(AppError::NotFound("User ingredient"))?;

    user.ensure_owner(item.user_id)?;
    Ok(item)
}

pub async fn list(
    State(state): State<SharedState>,
    user: CurrentUser,
    Query(query): Query<PantryQuery>,
) -> Result<Json<List<PantryItem>>, AppError> {
    query.validate()?;

    let today = today();
    let items: Vec<PantryItem> = state
        .store
        .all::<PantryItem>()
        .await?
        .into_iter()
        .filter(|item| item.user_id == user.id())
        .filter(|item| !query.expiring_soon || item.expires_within(today, query.days_ahead))
        .collect();

    let mut list = paginate(items, query.page());
    attach_ingredients(&mut list.data, &catalog(&state.store).await?);

    Ok(Json(list))
}

pub async fn read(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PantryItem>, AppError> {
    let item = owned_item(&state.store, &user, id).await?;

    attach_ingredient(&state.store, item).await.map(Json)
}

pub async fn create(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(payload): Json<PantryItemCreate>,
) -> Result<Json<PantryItem>, AppError> {
    payload.validate()?;
    ensure_ingredient_exists(&state.store, payload.ingredient_id).await?;

    let item = payload.into_item(Uuid::new_v4(), user.id(), Utc::now());
    state.store.put(&item).await?;

    info!(id = %item.id, user = %item.user_id, "Pantry item created");
    attach_ingredient(&state.store, item).await.map(Json)
}

pub async fn update(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PantryItemUpdate>,
) -> Result<Json<PantryItem>, AppError> {
    payload.validate()?;

    let mut item = owned_item(&state.store, &user, id).await?;

    if let Some(ingredient_id) = payload.ingredient_id {
        ensure_ingredient_exists(&state.store, ingredient_id).await?;
    }

    payload.apply(&mut item);
    state.store.put(&item).await?;

    attach_ingredient(&state.store, item).await.map(Json)
}

pub async fn delete(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    owned_item(&state.store, &user, id).await?;

    if !state.store.remove::<PantryItem>(id).await? {
        return Err(AppError::NotFound("User ingredient"));
    }

    Ok(Json(Message::new("User ingredient deleted successfully")))
}
