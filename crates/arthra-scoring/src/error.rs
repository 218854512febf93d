use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A required input is missing, non-numeric or outside its precondition.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl ScoringError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the input that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ScoringError::InvalidInput { field, .. } => field,
        }
    }
}
