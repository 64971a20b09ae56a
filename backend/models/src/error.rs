use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Character-count bounds, inclusive on both ends.
pub fn check_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();

    if len < min {
        return Err(ValidationError::new(
            field,
            format!("must have at least {min} characters"),
        ));
    }

    if len > max {
        return Err(ValidationError::new(
            field,
            format!("must have at most {max} characters"),
        ));
    }

    Ok(())
}

pub fn check_optional_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => check_len(field, value, 0, max),
        None => Ok(()),
    }
}
