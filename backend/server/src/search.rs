//! # Search
//!
//! Case-insensitive substring filtering for list endpoints.
//!
//! - Ingredients match on name or category
//! - Recipes match on name, description or cuisine
//! - Users match on email or full name
//! - `count` is taken after filtering and before the page window, so the
//!   client can size its pagination
use models::{Ingredient, List, Page, Recipe, User};

pub trait Searchable {
    fn fields(&self) -> Vec<Option<&str>>;
}

impl Searchable for Ingredient {
    fn fields(&self) -> Vec<Option<&str>> {
        vec![Some(&self.name), self.category.as_deref()]
    }
}

impl Searchable for Recipe {
    fn fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(&self.name),
            self.description.as_deref(),
            self.cuisine.as_deref(),
        ]
    }
}

impl Searchable for User {
    fn fields(&self) -> Vec<Option<&str>> {
        vec![Some(&self.email), self.full_name.as_deref()]
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn matches<T: Searchable>(item: &T, needle: &str) -> bool {
    item.fields()
        .into_iter()
        .flatten()
        .any(|field| contains_ignore_case(field, needle))
}

pub fn search_page<T: Searchable>(items: Vec<T>, needle: Option<&str>, page: Page) -> List<T> {
    let filtered: Vec<T> = match needle {
        Some(needle) => items.into_iter().filter(|item| matches(item, needle)).collect(),
        None => items,
    };

    paginate(filtered, page)
}

pub fn paginate<T>(items: Vec<T>, page: Page) -> List<T> {
    let count = items.len();

    List {
        data: page.slice(items),
        count,
    }
}
