use std::future::Future;

use uuid::Uuid;

use arthra_core::models::allergy::{AllergyEntry, NewAllergy};
use arthra_core::models::examination::ExaminationNote;
use arthra_core::models::joint::{JointObservation, NewJointObservation};
use arthra_core::models::patient::{NewPatient, Patient};
use arthra_core::models::score::{Das28Inputs, ScoreResult};

use crate::error::StorageError;

/// Key-based access to patient records.
///
/// Every collection is append-only. Implementations assign each appended
/// record the next per-patient, per-collection `sequence` (starting at 1), and
/// list methods return records in ascending sequence. Appends for a patient
/// that does not exist fail with [`StorageError::PatientNotFound`], and every
/// append call is atomic: either all of its records are persisted or none.
pub trait PatientStore: Send + Sync {
    fn create_patient(
        &self,
        patient: NewPatient,
    ) -> impl Future<Output = Result<Patient, StorageError>> + Send;

    fn get_patient(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Patient>, StorageError>> + Send;

    /// Patients whose "first last" name contains `query`, case-insensitively,
    /// oldest first. An empty query matches everyone.
    fn search_patients(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Patient>, StorageError>> + Send;

    fn list_allergies(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Vec<AllergyEntry>, StorageError>> + Send;

    fn append_allergies(
        &self,
        patient_id: Uuid,
        entries: Vec<NewAllergy>,
    ) -> impl Future<Output = Result<Vec<AllergyEntry>, StorageError>> + Send;

    /// The examination note with the highest sequence, if any.
    fn latest_examination(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Option<ExaminationNote>, StorageError>> + Send;

    fn append_examination(
        &self,
        patient_id: Uuid,
        notes: String,
    ) -> impl Future<Output = Result<ExaminationNote, StorageError>> + Send;

    fn list_joint_observations(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Vec<JointObservation>, StorageError>> + Send;

    fn append_joint_observations(
        &self,
        patient_id: Uuid,
        observations: Vec<NewJointObservation>,
    ) -> impl Future<Output = Result<Vec<JointObservation>, StorageError>> + Send;

    /// The score result with the highest sequence, if any.
    fn latest_score(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Option<ScoreResult>, StorageError>> + Send;

    /// Persist a computed score alongside the inputs it was computed from.
    fn append_score(
        &self,
        patient_id: Uuid,
        inputs: Das28Inputs,
        score: f64,
    ) -> impl Future<Output = Result<ScoreResult, StorageError>> + Send;
}

/// The record with the highest sequence.
pub(crate) fn latest_by_sequence<T, F>(records: Vec<T>, sequence: F) -> Option<T>
where
    F: Fn(&T) -> u64,
{
    records.into_iter().max_by_key(|r| sequence(r))
}
