//! List pages keep their state in the URL so it survives reloads and links.
//!
//! Recognized parameters are `page`, `search` and `expiring_soon`. Anything
//! else already in the query string is left untouched, and defaults are
//! never written out.
use models::{IngredientQuery, PantryQuery, RecipeQuery, SearchQuery};
use reqwest::Url;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

const PAGE: &str = "page";
const SEARCH: &str = "search";
const EXPIRING_SOON: &str = "expiring_soon";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    /// 1-based.
    pub page: u32,
    pub search: Option<String>,
    pub expiring_soon: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            expiring_soon: false,
        }
    }
}

impl ListState {
    /// Unparseable values fall back to their defaults.
    pub fn from_url(url: &Url) -> Self {
        let mut state = Self::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                PAGE => state.page = value.parse().ok().filter(|page| *page >= 1).unwrap_or(1),
                SEARCH => state.search = clean_search(&value),
                EXPIRING_SOON => state.expiring_soon = matches!(value.as_ref(), "true" | "1"),
                _ => {}
            }
        }

        state
    }

    pub fn write_to(&self, url: &mut Url) {
        let others: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| ![PAGE, SEARCH, EXPIRING_SOON].contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &others {
                pairs.append_pair(key, value);
            }
            if self.page > 1 {
                pairs.append_pair(PAGE, &self.page.to_string());
            }
            if let Some(search) = &self.search {
                pairs.append_pair(SEARCH, search);
            }
            if self.expiring_soon {
                pairs.append_pair(EXPIRING_SOON, "true");
            }
        }

        if url.query() == Some("") {
            url.set_query(None);
        }
    }

    /// A new search starts again from the first page.
    pub fn with_search(self, search: &str) -> Self {
        Self {
            page: 1,
            search: clean_search(search),
            ..self
        }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn with_expiring_soon(self, expiring_soon: bool) -> Self {
        Self {
            page: 1,
            expiring_soon,
            ..self
        }
    }

    pub fn skip(&self, page_size: u32) -> u32 {
        self.page.saturating_sub(1).saturating_mul(page_size)
    }

    pub fn ingredient_query(&self, page_size: u32) -> IngredientQuery {
        self.search_query(page_size)
    }

    pub fn recipe_query(&self, page_size: u32) -> RecipeQuery {
        self.search_query(page_size)
    }

    fn search_query(&self, page_size: u32) -> SearchQuery {
        SearchQuery {
            skip: self.skip(page_size),
            limit: page_size,
            search: self.search.clone(),
        }
    }

    pub fn pantry_query(&self, page_size: u32) -> PantryQuery {
        PantryQuery {
            skip: self.skip(page_size),
            limit: page_size,
            expiring_soon: self.expiring_soon,
            ..PantryQuery::default()
        }
    }
}

fn clean_search(search: &str) -> Option<String> {
    let search = search.trim();
    (!search.is_empty()).then(|| search.to_string())
}

/// Number of pages needed for `total` items, never less than one.
pub fn page_count(total: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    let pages = total.div_ceil(page_size).max(1);

    u32::try_from(pages).unwrap_or(u32::MAX)
}
