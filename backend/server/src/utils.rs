use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use models::{Ingredient, PantryItem, RecipeIngredient};
use uuid::Uuid;

use crate::{error::AppError, store::Store};

/// Local calendar date, used for expiration checks.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Records that point at a catalog ingredient and embed it in responses.
pub trait WithIngredient {
    fn ingredient_id(&self) -> Uuid;

    fn set_ingredient(&mut self, ingredient: Option<Ingredient>);
}

impl WithIngredient for RecipeIngredient {
    fn ingredient_id(&self) -> Uuid {
        self.ingredient_id
    }

    fn set_ingredient(&mut self, ingredient: Option<Ingredient>) {
        self.ingredient = ingredient;
    }
}

impl WithIngredient for PantryItem {
    fn ingredient_id(&self) -> Uuid {
        self.ingredient_id
    }

    fn set_ingredient(&mut self, ingredient: Option<Ingredient>) {
        self.ingredient = ingredient;
    }
}

pub async fn attach_ingredient<T: WithIngredient>(store: &Store, mut record: T) -> Result<T, AppError> {
    let ingredient = store.find::<Ingredient>(record.ingredient_id()).await?;
    record.set_ingredient(ingredient);

    Ok(record)
}

pub fn attach_ingredients<T: WithIngredient>(
    records: &mut [T],
    catalog: &HashMap<Uuid, Ingredient>,
) {
    for record in records {
        let ingredient = catalog.get(&record.ingredient_id()).cloned();
        record.set_ingredient(ingredient);
    }
}

pub async fn catalog(store: &Store) -> Result<HashMap<Uuid, Ingredient>, AppError> {
    Ok(store
        .all::<Ingredient>()
        .await?
        .into_iter()
        .map(|ingredient| (ingredient.id, ingredient))
        .collect())
}

pub async fn ensure_ingredient_exists(store: &Store, ingredient_id: Uuid) -> Result<(), AppError> {
    match store.find::<Ingredient>(ingredient_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound("Ingredient")),
    }
}
