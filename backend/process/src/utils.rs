use regex::Regex;

pub struct Normalizer {
    separators: Regex,
    symbols: Regex,
    spaces: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            separators: Regex::new(r"[_\s]")?,
            symbols: Regex::new(r"[^\p{L}\p{N}\- ]")?,
            spaces: Regex::new(r" +")?,
        })
    }

    /// Keeps letters, digits, dashes and single spaces. Case is preserved.
    pub fn normalize(&self, input: &str) -> String {
        let s = self.separators.replace_all(input, " ");
        let s = self.symbols.replace_all(&s, "");

        self.spaces.replace_all(s.trim(), " ").into_owned()
    }

    /// Blank values become `None`.
    pub fn normalize_optional(&self, input: Option<&str>) -> Option<String> {
        input
            .map(|value| self.normalize(value))
            .filter(|value| !value.is_empty())
    }
}

/// Names that differ only in case are the same ingredient.
pub fn dedup_key(name: &str) -> String {
    name.to_lowercase()
}
