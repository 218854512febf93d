pub mod allergies;
pub mod das28;
pub mod examination;
pub mod health;
pub mod joints;
pub mod patients;
pub mod reports;

use uuid::Uuid;

use arthra_core::models::patient::Patient;
use arthra_storage::PatientStore;

use crate::error::ApiError;

/// Resolve a patient or fail with 404.
pub(crate) async fn require_patient<S: PatientStore>(
    store: &S,
    patient_id: Uuid,
) -> Result<Patient, ApiError> {
    store
        .get_patient(patient_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))
}
