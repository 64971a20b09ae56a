use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    amount::Amount,
    error::{ValidationError, check_len, check_optional_len},
    ingredients::Ingredient,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    /// Free text, usually easy, medium or hard.
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
}

fn check_servings(servings: Option<u32>) -> Result<(), ValidationError> {
    match servings {
        Some(0) => Err(ValidationError::new(
            "servings",
            "must be greater than or equal to 1",
        )),
        _ => Ok(()),
    }
}

impl RecipeCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("name", &self.name, 1, 255)?;
        check_optional_len("description", self.description.as_deref(), 1000)?;
        check_optional_len("instructions", self.instructions.as_deref(), 5000)?;
        check_servings(self.servings)?;
        check_optional_len("difficulty", self.difficulty.as_deref(), 50)?;
        check_optional_len("cuisine", self.cuisine.as_deref(), 100)
    }

    pub fn into_recipe(self, id: Uuid, owner_id: Uuid, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            owner_id,
            name: self.name,
            description: self.description,
            instructions: self.instructions,
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            servings: self.servings,
            difficulty: self.difficulty,
            cuisine: self.cuisine,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub instructions: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub prep_time_minutes: Option<Option<u32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub cook_time_minutes: Option<Option<u32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub servings: Option<Option<u32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub difficulty: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub cuisine: Option<Option<String>>,
}

impl RecipeUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_len("name", name, 1, 255)?;
        }
        if let Some(description) = &self.description {
            check_optional_len("description", description.as_deref(), 1000)?;
        }
        if let Some(instructions) = &self.instructions {
            check_optional_len("instructions", instructions.as_deref(), 5000)?;
        }
        if let Some(servings) = self.servings {
            check_servings(servings)?;
        }
        if let Some(difficulty) = &self.difficulty {
            check_optional_len("difficulty", difficulty.as_deref(), 50)?;
        }
        if let Some(cuisine) = &self.cuisine {
            check_optional_len("cuisine", cuisine.as_deref(), 100)?;
        }

        Ok(())
    }

    pub fn apply(self, recipe: &mut Recipe) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(description) = self.description {
            recipe.description = description;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
        if let Some(prep) = self.prep_time_minutes {
            recipe.prep_time_minutes = prep;
        }
        if let Some(cook) = self.cook_time_minutes {
            recipe.cook_time_minutes = cook;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(cuisine) = self.cuisine {
            recipe.cuisine = cuisine;
        }
    }
}

/// An ingredient a recipe needs, with the amount in the ingredient's unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub amount: Amount,
    /// Preparation hint such as "chopped".
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Ingredient>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientCreate {
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecipeIngredientCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_optional_len("notes", self.notes.as_deref(), 500)
    }

    pub fn into_recipe_ingredient(self, id: Uuid, created_at: DateTime<Utc>) -> RecipeIngredient {
        RecipeIngredient {
            id,
            recipe_id: self.recipe_id,
            ingredient_id: self.ingredient_id,
            amount: self.amount,
            notes: self.notes,
            ingredient: None,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub notes: Option<Option<String>>,
}

impl RecipeIngredientUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.notes {
            Some(notes) => check_optional_len("notes", notes.as_deref(), 500),
            None => Ok(()),
        }
    }

    pub fn apply(self, link: &mut RecipeIngredient) {
        if let Some(recipe_id) = self.recipe_id {
            link.recipe_id = recipe_id;
        }
        if let Some(ingredient_id) = self.ingredient_id {
            link.ingredient_id = ingredient_id;
        }
        if let Some(amount) = self.amount {
            link.amount = amount;
        }
        if let Some(notes) = self.notes {
            link.notes = notes;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeWithIngredients {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub recipe_ingredients: Vec<RecipeIngredient>,
}

/// How well a recipe matches a pantry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    pub recipe: RecipeWithIngredients,
    /// `available_count / total_ingredients`, within 0..=1.
    pub match_score: f64,
    pub available_ingredients: Vec<RecipeIngredient>,
    pub missing_ingredients: Vec<RecipeIngredient>,
    pub total_ingredients: usize,
    pub available_count: usize,
}
