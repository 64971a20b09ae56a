use std::fmt;

use chrono::NaiveDate;
use models::RecipeSuggestion;

/// `45m`, `2h` or `1h 30m`.
pub fn format_minutes(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);

    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

pub fn format_optional_minutes(minutes: Option<u32>) -> String {
    minutes.map_or_else(|| "-".to_string(), format_minutes)
}

pub fn total_time(prep: Option<u32>, cook: Option<u32>) -> Option<u32> {
    match (prep, cook) {
        (None, None) => None,
        (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
    }
}

pub fn match_percent(score: f64) -> String {
    let percent = (score.clamp(0.0, 1.0) * 100.0).round() as u32;
    format!("{percent}%")
}

pub fn availability(suggestion: &RecipeSuggestion) -> String {
    format!(
        "{}/{} ingredients",
        suggestion.available_count, suggestion.total_ingredients
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Expired,
    /// Days left, 0 meaning today.
    ExpiringSoon(u32),
    Fresh,
    NoDate,
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStatus::Expired => write!(f, "Expired"),
            ExpiryStatus::ExpiringSoon(0) => write!(f, "Expires today"),
            ExpiryStatus::ExpiringSoon(1) => write!(f, "Expires tomorrow"),
            ExpiryStatus::ExpiringSoon(days) => write!(f, "Expires in {days} days"),
            ExpiryStatus::Fresh => write!(f, "Fresh"),
            ExpiryStatus::NoDate => write!(f, "-"),
        }
    }
}

pub fn expiry_status(date: Option<NaiveDate>, today: NaiveDate, days_ahead: u32) -> ExpiryStatus {
    let Some(date) = date else {
        return ExpiryStatus::NoDate;
    };

    let days = (date - today).num_days();
    if days < 0 {
        ExpiryStatus::Expired
    } else if days <= i64::from(days_ahead) {
        ExpiryStatus::ExpiringSoon(days as u32)
    } else {
        ExpiryStatus::Fresh
    }
}
