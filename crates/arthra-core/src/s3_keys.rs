//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the Arthra S3 bucket. Every patient owns one prefix;
//! each append-only collection is a single JSON array under it.

use uuid::Uuid;

pub const PATIENTS_PREFIX: &str = "patients/";

const PATIENT_FILE: &str = "patient.json";

pub fn patient_prefix(id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{id}/")
}

pub fn patient(id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{id}/{PATIENT_FILE}")
}

/// True if `key` is the demographic record of some patient.
pub fn is_patient_key(key: &str) -> bool {
    key.starts_with(PATIENTS_PREFIX) && key.ends_with(PATIENT_FILE)
}

pub fn allergies(patient_id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{patient_id}/allergies.json")
}

pub fn examinations(patient_id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{patient_id}/examinations.json")
}

pub fn joints(patient_id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{patient_id}/joints.json")
}

pub fn scores(patient_id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{patient_id}/das28.json")
}
