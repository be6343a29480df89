use thiserror::Error;

/// Free-text user input that does not parse as the number it stands for
///
/// This is expected noise from the presentation layer. Callers log it and
/// carry on as if the input were empty; it never becomes a request failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed {field} input: {value:?}")]
pub struct MalformedInputError {
    pub field: &'static str,
    pub value: String,
}

impl MalformedInputError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Parse a numeric criterion. Blank input is `Ok(None)`.
pub fn parse_number(field: &'static str, input: &str) -> Result<Option<f64>, MalformedInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(MalformedInputError::new(field, input)),
    }
}

/// Parse a manually typed page number. Blank input is `Ok(None)`.
pub fn parse_page_number(input: &str) -> Result<Option<u64>, MalformedInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| MalformedInputError::new("page", input))
}
