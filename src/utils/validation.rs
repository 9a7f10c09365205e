//! Centralized validation and helper functions.

/// Maximum number of families accepted from a single pan-genome file
pub const MAX_FAMILIES: usize = 10_000_000;

/// Maximum number of members on a single pan-genome line
pub const MAX_MEMBERS_PER_FAMILY: usize = 1_000_000;

/// Validate that a tolerance is a finite fraction in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use corepers::utils::validation::is_valid_tolerance;
///
/// assert!(is_valid_tolerance(0.95));
/// assert!(is_valid_tolerance(1.0));
/// assert!(!is_valid_tolerance(1.5));
/// assert!(!is_valid_tolerance(f64::NAN));
/// ```
#[must_use]
pub fn is_valid_tolerance(tolerance: f64) -> bool {
    tolerance.is_finite() && (0.0..=1.0).contains(&tolerance)
}

/// clap value parser for `--tol`
///
/// # Errors
///
/// Returns a message if the value is not a number or is outside `[0, 1]`.
pub fn parse_tolerance(s: &str) -> Result<f64, String> {
    let tolerance: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if is_valid_tolerance(tolerance) {
        Ok(tolerance)
    } else {
        Err(format!("tolerance must be between 0 and 1, got {tolerance}"))
    }
}

/// Check if adding another family would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new family.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_family_limit(count: usize) -> Option<String> {
    if count >= MAX_FAMILIES {
        Some(format!(
            "Too many families: adding another would exceed maximum of {MAX_FAMILIES}"
        ))
    } else {
        None
    }
}

/// Format a tolerance the way it appears in output file names (`1.0`, `0.99`)
#[must_use]
pub fn format_tolerance(tolerance: f64) -> String {
    format!("{tolerance:?}")
}
