//! # Models
//!
//! Wire types shared by the server and its clients.
//!
//! ## Entities
//! - Ingredients: global catalog (name, category, unit)
//! - Recipes: owned by a user, list the ingredients they need
//! - Pantry items: a user's stock of an ingredient, optionally dated
//! - Users: authenticated by bearer token
//!
//! Create and update payloads validate their own bounds. Updates are partial,
//! unset fields are left alone and nullable fields may be cleared with `null`.
use serde::{Deserialize, Serialize};

pub mod amount;
pub mod error;
pub mod ingredients;
pub mod pantry;
pub mod query;
pub mod recipes;
pub mod users;

pub use amount::Amount;
pub use error::ValidationError;
pub use ingredients::{Ingredient, IngredientCreate, IngredientUpdate};
pub use pantry::{PantryItem, PantryItemCreate, PantryItemUpdate};
pub use query::{
    IngredientQuery, Page, PantryQuery, RecipeIngredientQuery, RecipeQuery, SearchQuery,
    SuggestionQuery,
};
pub use recipes::{
    Recipe, RecipeCreate, RecipeIngredient, RecipeIngredientCreate, RecipeIngredientUpdate,
    RecipeSuggestion, RecipeUpdate, RecipeWithIngredients,
};
pub use users::{User, UserCreate, UserCreated, UserUpdate, UserUpdateMe};

/// A page of results; `count` is the total matching before pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub data: Vec<T>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
