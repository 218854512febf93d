use thiserror::Error;
use uuid::Uuid;

use arthra_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}
