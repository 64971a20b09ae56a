//! # Recipe Suggestions
//!
//! Ranks the recipe catalog against one user's pantry.
//!
//! 1. Usable stock: pantry items that are undated or not yet expired, summed per ingredient
//! 2. Per recipe with at least one ingredient, split its ingredients into available and missing.
//!    Available means stocked, and when amounts are required, stocked in at least the recipe's amount
//! 3. Score is available / total, recipes under the threshold are dropped
//! 4. Order by score, then available count (both descending), then name and id for stable output
//! 5. Keep the first `limit`
//!
//! Recomputed per request, nothing is cached.
use std::{cmp::Ordering, collections::HashMap};

use chrono::NaiveDate;
use models::{
    Amount, PantryItem, Recipe, RecipeIngredient, RecipeSuggestion, RecipeWithIngredients,
    SuggestionQuery,
};
use uuid::Uuid;

pub fn usable_stock(pantry: &[PantryItem], today: NaiveDate) -> HashMap<Uuid, Amount> {
    let mut stock: HashMap<Uuid, Amount> = HashMap::new();

    for item in pantry.iter().filter(|item| item.is_usable_on(today)) {
        let held = stock.entry(item.ingredient_id).or_default();
        *held = held.saturating_add(item.amount);
    }

    stock
}

pub fn rank(
    recipes: Vec<Recipe>,
    links: Vec<RecipeIngredient>,
    pantry: &[PantryItem],
    query: &SuggestionQuery,
    today: NaiveDate,
) -> Vec<RecipeSuggestion> {
    let stock = usable_stock(pantry, today);

    let mut by_recipe: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
    for link in links {
        by_recipe.entry(link.recipe_id).or_default().push(link);
    }

    let mut suggestions: Vec<RecipeSuggestion> = recipes
        .into_iter()
        .filter_map(|recipe| {
            let recipe_ingredients = by_recipe.remove(&recipe.id)?;
            score(recipe, recipe_ingredients, &stock, query.require_amount)
        })
        .filter(|suggestion| suggestion.match_score >= query.min_match_score)
        .collect();

    suggestions.sort_by(by_rank);
    suggestions.truncate(query.limit as usize);

    suggestions
}

fn score(
    recipe: Recipe,
    recipe_ingredients: Vec<RecipeIngredient>,
    stock: &HashMap<Uuid, Amount>,
    require_amount: bool,
) -> Option<RecipeSuggestion> {
    if recipe_ingredients.is_empty() {
        return None;
    }

    let (available, missing): (Vec<_>, Vec<_>) =
        recipe_ingredients
            .iter()
            .cloned()
            .partition(|link| match stock.get(&link.ingredient_id) {
                Some(held) => !require_amount || *held >= link.amount,
                None => false,
            });

    let total_ingredients = recipe_ingredients.len();
    let available_count = available.len();

    Some(RecipeSuggestion {
        recipe: RecipeWithIngredients {
            recipe,
            recipe_ingredients,
        },
        match_score: available_count as f64 / total_ingredients as f64,
        available_ingredients: available,
        missing_ingredients: missing,
        total_ingredients,
        available_count,
    })
}

fn by_rank(a: &RecipeSuggestion, b: &RecipeSuggestion) -> Ordering {
    b.match_score
        .total_cmp(&a.match_score)
        .then_with(|| b.available_count.cmp(&a.available_count))
        .then_with(|| a.recipe.recipe.name.cmp(&b.recipe.recipe.name))
        .then_with(|| a.recipe.recipe.id.cmp(&b.recipe.recipe.id))
}
