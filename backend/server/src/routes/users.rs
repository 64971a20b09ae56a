use axum::extract::State;
use chrono::Utc;
use models::{
    List, Message, PantryItem, Recipe, RecipeIngredient, SearchQuery, User, UserCreate,
    UserCreated, UserUpdate, UserUpdateMe,
};
use tracing::info;
use uuid::Uuid;

use super::SharedState;
use crate::{
    auth::{CurrentUser, EmailIndex, find_user_by_email, grant, issue_token, revoke_all, save_user},
    error::AppError,
    extract::{Json, Path, Query},
    search::search_page,
    store::Store,
};

/// Fails when `email` already belongs to someone other than `user_id`.
async fn ensure_email_free(store: &Store, email: &str, user_id: Option<Uuid>) -> Result<(), AppError> {
    match find_user_by_email(store, email).await? {
        Some(existing) if Some(existing.id) != user_id => Err(AppError::EmailTaken),
        _ => Ok(()),
    }
}

pub async fn me(user: CurrentUser) -> Json<User> {
    Json(user.0)
}

pub async fn update_me(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(payload): Json<UserUpdateMe>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;
    if let Some(email) = &payload.email {
        ensure_email_free(&state.store, email, Some(user.id())).await?;
    }

    let mut updated = user.0;
    let previous_email = updated.email.clone();
    payload.apply(&mut updated);
    save_user(&state.store, &updated, Some(&previous_email)).await?;

    Ok(Json(updated))
}

pub async fn list(
    State(state): State<SharedState>,
    user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<List<User>>, AppError> {
    user.ensure_superuser()?;
    query.validate()?;

    let users = state.store.all::<User>().await?;

    Ok(Json(search_page(users, query.needle(), query.page())))
}

/// Creates a user and returns their token; only a digest of it is kept.
pub async fn create(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> Result<Json<UserCreated>, AppError> {
    user.ensure_superuser()?;
    payload.validate()?;
    ensure_email_free(&state.store, &payload.email, None).await?;

    let created = payload.into_user(Uuid::new_v4(), Utc::now());
    save_user(&state.store, &created, None).await?;

    let token = issue_token();
    grant(&state.store, created.id, &token).await?;

    info!(id = %created.id, email = %created.email, by = %user.id(), "User created");
    Ok(Json(UserCreated {
        user: created,
        token,
    }))
}

/// Anyone may read themselves; other accounts need a superuser.
pub async fn read(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    if id == user.id() {
        return Ok(Json(user.0));
    }
    user.ensure_superuser()?;

    state
        .store
        .find::<User>(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("User"))
}

pub async fn update(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<User>, AppError> {
    user.ensure_superuser()?;
    payload.validate()?;

    let mut target = state
        .store
        .find::<User>(id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if let Some(email) = &payload.email {
        ensure_email_free(&state.store, email, Some(id)).await?;
    }

    let previous_email = target.email.clone();
    payload.apply(&mut target);
    save_user(&state.store, &target, Some(&previous_email)).await?;

    info!(
        %id,
        active = target.is_active,
        superuser = target.is_superuser,
        by = %user.id(),
        "User updated"
    );
    Ok(Json(target))
}

/// Also removes the user's recipes with their lines, pantry items and tokens.
pub async fn delete(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    user.ensure_superuser()?;
    if id == user.id() {
        return Err(AppError::SelfDelete);
    }

    let target = state
        .store
        .find::<User>(id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let store = &state.store;
    let mut cascaded = 0;

    let recipes: Vec<Uuid> = store
        .all::<Recipe>()
        .await?
        .into_iter()
        .filter(|recipe| recipe.owner_id == id)
        .map(|recipe| recipe.id)
        .collect();

    for link in store.all::<RecipeIngredient>().await? {
        if recipes.contains(&link.recipe_id) {
            store.remove::<RecipeIngredient>(link.id).await?;
            cascaded += 1;
        }
    }
    for recipe in &recipes {
        store.remove::<Recipe>(*recipe).await?;
        cascaded += 1;
    }

    for item in store.all::<PantryItem>().await? {
        if item.user_id == id {
            store.remove::<PantryItem>(item.id).await?;
            cascaded += 1;
        }
    }

    let revoked = revoke_all(store, id).await?;
    store.delete::<EmailIndex>(&target.email).await?;
    store.remove::<User>(id).await?;

    info!(%id, cascaded, revoked, by = %user.id(), "User deleted");
    Ok(Json(Message::new("User deleted successfully")))
}
