use thiserror::Error;

/// Validation failures while turning request input into domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unknown record kind: {0}")]
    UnknownKind(String),

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },
}
