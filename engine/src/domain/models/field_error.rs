/// Validation failure for a single input field. The `Display` output is the
/// exact user-facing message the caller renders next to the field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// A required field was empty or absent
    #[error("{0} is required")]
    MissingField(String),
    /// The field did not parse to a real calendar date. Carries the field
    /// label already lowercased for the middle of the sentence.
    #[error("Please enter a valid {0}")]
    InvalidDate(String),
    /// The date lies after the end of the current day
    #[error("{0} cannot be in the future")]
    FutureDate(String),
    /// The date lies further back than the configured plausible maximum
    #[error("{label} should be within the last {max_days_ago} days")]
    TooOld { label: String, max_days_ago: i64 },
    /// A numeric field was absent or outside its allowed range
    #[error("{0}")]
    OutOfRange(String),
    /// Defensive fallback for anything that fails inside the arithmetic
    #[error("An error occurred during calculation. Please check your inputs.")]
    GeneralCalculationFailure,
}
