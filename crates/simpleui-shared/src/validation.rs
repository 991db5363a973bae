//! Input rules shared by the store and the HTTP layer.
//!
//! Every function here is pure: it either returns the normalised value that
//! should be persisted or the [`ValidationError`] describing the broken rule.

use crate::constants::{ANONYMOUS_AUTHOR, MAX_RATING, MIN_DOWNLOAD_NAME_LEN, MIN_RATING};
use crate::error::ValidationError;

/// Trim a download registration name and check its minimum length.
///
/// Length is counted in characters, not bytes, so `"Zoë"` is accepted.
pub fn download_name(raw: &str) -> Result<&str, ValidationError> {
    let name = raw.trim();
    if name.chars().count() < MIN_DOWNLOAD_NAME_LEN {
        return Err(ValidationError::NameTooShort {
            min: MIN_DOWNLOAD_NAME_LEN,
        });
    }
    Ok(name)
}

/// Trim a feedback author, falling back to [`ANONYMOUS_AUTHOR`] when blank.
pub fn feedback_author(raw: &str) -> &str {
    match raw.trim() {
        "" => ANONYMOUS_AUTHOR,
        name => name,
    }
}

/// Reject a feedback message that is empty after trimming.
///
/// The message itself is stored untrimmed.
pub fn feedback_message(raw: &str) -> Result<&str, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(raw)
}

/// Check a star rating against the 1..=5 range.
pub fn rating(value: u8) -> Result<u8, ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(ValidationError::RatingOutOfRange {
            rating: value,
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }
    Ok(value)
}
