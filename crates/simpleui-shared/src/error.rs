use thiserror::Error;

/// A user-supplied value broke one of the submission rules.
///
/// Validation failures never mutate the store and are safe to retry after
/// the user corrects their input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid name (min {min} characters)")]
    NameTooShort { min: usize },

    #[error("Please share your thoughts before submitting")]
    EmptyMessage,

    #[error("Rating must be between {min} and {max} stars, got {rating}")]
    RatingOutOfRange { rating: u8, min: u8, max: u8 },
}
