use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    amount::Amount,
    error::{ValidationError, check_optional_len},
    ingredients::Ingredient,
};

/// One stock entry in a user's pantry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ingredient_id: Uuid,
    pub amount: Amount,
    pub expiration_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Ingredient>,
    pub created_at: DateTime<Utc>,
}

impl PantryItem {
    /// Usable for cooking on `today`; items without a date never expire.
    pub fn is_usable_on(&self, today: NaiveDate) -> bool {
        match self.expiration_date {
            Some(date) => date >= today,
            None => true,
        }
    }

    /// Dated and expiring on or before `today + days_ahead`.
    pub fn expires_within(&self, today: NaiveDate, days_ahead: u32) -> bool {
        let horizon = today + chrono::Days::new(u64::from(days_ahead));

        self.expiration_date.is_some_and(|date| date <= horizon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItemCreate {
    pub ingredient_id: Uuid,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PantryItemCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_optional_len("notes", self.notes.as_deref(), 500)
    }

    pub fn into_item(self, id: Uuid, user_id: Uuid, created_at: DateTime<Utc>) -> PantryItem {
        PantryItem {
            id,
            user_id,
            ingredient_id: self.ingredient_id,
            amount: self.amount,
            expiration_date: self.expiration_date,
            notes: self.notes,
            ingredient: None,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PantryItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub expiration_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub notes: Option<Option<String>>,
}

impl PantryItemUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.notes {
            Some(notes) => check_optional_len("notes", notes.as_deref(), 500),
            None => Ok(()),
        }
    }

    pub fn apply(self, item: &mut PantryItem) {
        if let Some(ingredient_id) = self.ingredient_id {
            item.ingredient_id = ingredient_id;
        }
        if let Some(amount) = self.amount {
            item.amount = amount;
        }
        if let Some(expiration_date) = self.expiration_date {
            item.expiration_date = expiration_date;
        }
        if let Some(notes) = self.notes {
            item.notes = notes;
        }
    }
}
