use uuid::Uuid;

use arthra_core::models::report::ReportBundle;
use arthra_storage::PatientStore;

use crate::error::AggregateError;

/// Collect everything the report needs for one patient.
///
/// Only a missing patient is an error. Absent examination notes or scores
/// become explicit `NotRecorded` sections and empty collections stay empty,
/// so a partially documented patient still gets a complete report. Nothing is
/// written to the store.
pub async fn aggregate<S: PatientStore>(
    store: &S,
    patient_id: Uuid,
) -> Result<ReportBundle, AggregateError> {
    let patient = store
        .get_patient(patient_id)
        .await?
        .ok_or(AggregateError::PatientNotFound(patient_id))?;

    let allergies = store.list_allergies(patient_id).await?;
    let examination = store.latest_examination(patient_id).await?;
    let joints = store.list_joint_observations(patient_id).await?;
    let score = store.latest_score(patient_id).await?;

    tracing::debug!(
        patient_id = %patient_id,
        allergies = allergies.len(),
        joints = joints.len(),
        has_examination = examination.is_some(),
        has_score = score.is_some(),
        "aggregated report bundle"
    );

    Ok(ReportBundle {
        patient,
        allergies,
        examination: examination.into(),
        joints,
        score: score.into(),
    })
}
