use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, check_len, check_optional_len};

pub const DEFAULT_UNIT: &str = "grams";

/// Catalog entry shared by every user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl IngredientCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            unit: default_unit(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("name", &self.name, 1, 255)?;
        check_optional_len("category", self.category.as_deref(), 100)?;
        check_len("unit", &self.unit, 0, 50)
    }

    pub fn into_ingredient(self, id: Uuid, created_at: DateTime<Utc>) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            category: self.category,
            unit: self.unit,
            created_at,
        }
    }
}

/// Partial update; `category: null` clears the category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl IngredientUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_len("name", name, 1, 255)?;
        }
        if let Some(category) = &self.category {
            check_optional_len("category", category.as_deref(), 100)?;
        }
        check_optional_len("unit", self.unit.as_deref(), 50)
    }

    pub fn apply(self, ingredient: &mut Ingredient) {
        if let Some(name) = self.name {
            ingredient.name = name;
        }
        if let Some(category) = self.category {
            ingredient.category = category;
        }
        if let Some(unit) = self.unit {
            ingredient.unit = unit;
        }
    }
}
