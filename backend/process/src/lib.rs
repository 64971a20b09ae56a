//! # Catalog Import
//!
//! Seeds the shared ingredient catalog from a JSON file.
//!
//! ## Input
//!
//! A JSON array of `{ "name": string, "category"?: string, "unit"?: string }`.
//!
//! ## Steps
//! 1. Normalize every name: underscores and whitespace become single spaces,
//!    symbols other than dashes are dropped. Case is kept for display.
//!
//! 2. Skip entries whose name is empty afterwards or fails validation.
//!
//! 3. Page through the server catalog and collect the lowercased names.
//!
//! 4. Skip entries already on the server or seen earlier in the file.
//!
//! 5. Create what is left, one request per ingredient.
//!
//! ## Notes
//! - `--dry-run` stops after step 4 and only prints the totals.
//! - Dedup is case-insensitive; the first spelling in the file wins.
use std::{collections::HashSet, path::Path};

use indicatif::{ProgressBar, ProgressStyle};
use models::{IngredientCreate, IngredientQuery, query::MAX_PAGE_LIMIT};
use pantry::{ApiClient, ClientError};

pub mod catalog;
pub mod utils;

use catalog::{CatalogEntry, load_catalog};
use utils::{Normalizer, dedup_key};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub create: Vec<IngredientCreate>,
    pub duplicates: usize,
    pub invalid: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub read: usize,
    pub created: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

pub async fn import_file(client: &ApiClient, path: &Path, dry_run: bool) -> anyhow::Result<Summary> {
    let entries = load_catalog(path)?;
    println!("Loaded Entries: {}", entries.len());

    let existing = existing_names(client).await?;
    println!("Loaded Catalog: {}\n", existing.len());

    let read = entries.len();
    let plan = plan(entries, &existing, &Normalizer::new()?);

    let created = if dry_run || plan.create.is_empty() {
        0
    } else {
        create_all(client, &plan.create).await?
    };

    let summary = Summary {
        read,
        created,
        duplicates: plan.duplicates,
        invalid: plan.invalid,
    };

    if plan.create.is_empty() {
        println!("No new ingredients found. Exiting.");
    } else if dry_run {
        println!("Would Create: {}", plan.create.len());
        for ingredient in &plan.create {
            println!("  {}", ingredient.name);
        }
    } else {
        println!("Total New Items: {}", summary.created);
    }
    println!("Total Duplicates: {}", summary.duplicates);
    println!("Total Invalid: {}", summary.invalid);

    Ok(summary)
}

/// Lowercased names of every ingredient the server already has.
pub async fn existing_names(client: &ApiClient) -> Result<HashSet<String>, ClientError> {
    let mut names = HashSet::new();
    let mut query = IngredientQuery {
        limit: MAX_PAGE_LIMIT,
        ..IngredientQuery::default()
    };

    loop {
        let page = client.ingredients(&query).await?;
        let fetched = page.data.len();

        names.extend(page.data.iter().map(|ingredient| dedup_key(&ingredient.name)));
        query.skip += fetched as u32;

        if fetched == 0 || query.skip as usize >= page.count {
            return Ok(names);
        }
    }
}

pub fn plan(entries: Vec<CatalogEntry>, existing: &HashSet<String>, normalizer: &Normalizer) -> Plan {
    let mut seen = existing.clone();
    let mut plan = Plan::default();

    for entry in entries {
        let name = normalizer.normalize(&entry.name);

        let mut ingredient = IngredientCreate::new(name);
        ingredient.category = normalizer.normalize_optional(entry.category.as_deref());
        if let Some(unit) = normalizer.normalize_optional(entry.unit.as_deref()) {
            ingredient.unit = unit;
        }

        if ingredient.validate().is_err() {
            plan.invalid += 1;
            continue;
        }

        if !seen.insert(dedup_key(&ingredient.name)) {
            plan.duplicates += 1;
            continue;
        }

        plan.create.push(ingredient);
    }

    plan
}

async fn create_all(client: &ApiClient, ingredients: &[IngredientCreate]) -> anyhow::Result<usize> {
    let pb = ProgressBar::new(ingredients.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut created = 0;

    for ingredient in ingredients {
        pb.set_message(format!("Creating {}", ingredient.name));

        client.create_ingredient(ingredient).await?;
        created += 1;

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    Ok(created)
}
