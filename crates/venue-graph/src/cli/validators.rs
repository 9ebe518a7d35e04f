//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Validate a venue ID argument.
///
/// Surrounding whitespace is trimmed; the remainder must be non-empty and
/// must not contain `/`, which document paths reserve as a separator.
pub fn validate_venue_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Venue ID cannot be empty".to_string());
    }

    if s.contains('/') {
        return Err(format!("Invalid venue ID '{}': must not contain '/'", s));
    }

    Ok(s.to_string())
}

/// Validate a strictly positive count (batch sizes, level limits).
pub fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        return Err("Value must be at least 1".to_string());
    }

    Ok(value)
}
