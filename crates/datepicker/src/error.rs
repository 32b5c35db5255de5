/// Reasons a display string could not be read back into a calendar value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text and the format disagree on how many fields there are
    #[error("expected {expected} numeric fields, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("invalid number in date field: {0}")]
    InvalidNumber(String),

    /// A required field (year, month or day) is not named by the format
    #[error("format has no {0} field")]
    MissingField(&'static str),

    #[error("date is outside the supported calendar range")]
    OutOfRange,
}
