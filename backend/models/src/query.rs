//! Query string parameters for list endpoints.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const MAX_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_PAGE_LIMIT: u32 = 100;
pub const MAX_SUGGESTIONS: u32 = 50;
pub const DEFAULT_SUGGESTIONS: u32 = 10;
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 0.3;
pub const DEFAULT_DAYS_AHEAD: u32 = 7;
pub const MAX_DAYS_AHEAD: u32 = 30;

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_suggestions() -> u32 {
    DEFAULT_SUGGESTIONS
}

fn default_min_match_score() -> f64 {
    DEFAULT_MIN_MATCH_SCORE
}

fn default_days_ahead() -> u32 {
    DEFAULT_DAYS_AHEAD
}

fn check_limit(limit: u32, max: u32) -> Result<(), ValidationError> {
    if limit > max {
        return Err(ValidationError::new(
            "limit",
            format!("must be less than or equal to {max}"),
        ));
    }

    Ok(())
}

/// Offset pagination window shared by every list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit, MAX_PAGE_LIMIT)
    }

    /// Applies the window to an already filtered and ordered list.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.skip as usize)
            .take(self.limit as usize)
            .collect()
    }
}

/// Filter for ingredient and recipe lists; blank searches match everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
            search: None,
        }
    }
}

impl SearchQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.page().validate()
    }

    pub fn needle(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
    }
}

pub type IngredientQuery = SearchQuery;
pub type RecipeQuery = SearchQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredientQuery {
    pub recipe_id: Uuid,
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl RecipeIngredientQuery {
    pub fn new(recipe_id: Uuid) -> Self {
        Self {
            recipe_id,
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.page().validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub expiring_soon: bool,
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

impl Default for PantryQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
            expiring_soon: false,
            days_ahead: DEFAULT_DAYS_AHEAD,
        }
    }
}

impl PantryQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.page().validate()?;

        if !(1..=MAX_DAYS_AHEAD).contains(&self.days_ahead) {
            return Err(ValidationError::new(
                "days_ahead",
                format!("must be between 1 and {MAX_DAYS_AHEAD}"),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default = "default_suggestions")]
    pub limit: u32,
    #[serde(default = "default_min_match_score")]
    pub min_match_score: f64,
    /// Also require the pantry to hold at least the recipe's amount.
    #[serde(default)]
    pub require_amount: bool,
}

impl Default for SuggestionQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTIONS,
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            require_amount: false,
        }
    }
}

impl SuggestionQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit, MAX_SUGGESTIONS)?;

        if !(0.0..=1.0).contains(&self.min_match_score) {
            return Err(ValidationError::new(
                "min_match_score",
                "must be between 0 and 1",
            ));
        }

        Ok(())
    }
}
