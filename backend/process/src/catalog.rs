use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// One line of an import file. Missing units fall back to the server default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<CatalogEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
