use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use arthra_core::models::allergy::{AllergyEntry, NewAllergy};
use arthra_core::models::examination::ExaminationNote;
use arthra_core::models::joint::{JointObservation, NewJointObservation};
use arthra_core::models::patient::{NewPatient, Patient};
use arthra_core::models::score::{Das28Inputs, ScoreResult};

use crate::error::StorageError;
use crate::store::PatientStore;

/// Process-local store. Each append holds the write lock for its whole batch,
/// which makes it atomic with respect to every other call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Creation order.
    patients: Vec<Patient>,
    records: HashMap<Uuid, PatientRecords>,
}

#[derive(Debug, Default)]
struct PatientRecords {
    allergies: Vec<AllergyEntry>,
    examinations: Vec<ExaminationNote>,
    joints: Vec<JointObservation>,
    scores: Vec<ScoreResult>,
}

impl Inner {
    fn records(&self, patient_id: Uuid) -> Option<&PatientRecords> {
        self.records.get(&patient_id)
    }

    fn records_mut(&mut self, patient_id: Uuid) -> Result<&mut PatientRecords, StorageError> {
        self.records
            .get_mut(&patient_id)
            .ok_or(StorageError::PatientNotFound { id: patient_id })
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_sequence<T>(records: &[T]) -> u64 {
    records.len() as u64 + 1
}

impl PatientStore for MemoryStore {
    async fn create_patient(&self, patient: NewPatient) -> Result<Patient, StorageError> {
        let patient = patient.into_patient(Uuid::new_v4(), jiff::Timestamp::now());
        let mut inner = self.inner.write().await;
        inner.records.insert(patient.id, PatientRecords::default());
        inner.patients.push(patient.clone());
        tracing::debug!(patient_id = %patient.id, "patient created");
        Ok(patient)
    }

    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.patients.iter().find(|p| p.id == id).cloned())
    }

    async fn search_patients(&self, query: &str) -> Result<Vec<Patient>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .patients
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect())
    }

    async fn list_allergies(&self, patient_id: Uuid) -> Result<Vec<AllergyEntry>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records(patient_id)
            .map(|r| r.allergies.clone())
            .unwrap_or_default())
    }

    async fn append_allergies(
        &self,
        patient_id: Uuid,
        entries: Vec<NewAllergy>,
    ) -> Result<Vec<AllergyEntry>, StorageError> {
        let mut inner = self.inner.write().await;
        let records = inner.records_mut(patient_id)?;
        let now = jiff::Timestamp::now();
        let first = next_sequence(&records.allergies);
        let created: Vec<AllergyEntry> = entries
            .into_iter()
            .zip(first..)
            .map(|(entry, seq)| entry.into_entry(patient_id, seq, now))
            .collect();
        records.allergies.extend(created.iter().cloned());
        Ok(created)
    }

    async fn latest_examination(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<ExaminationNote>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records(patient_id)
            .and_then(|r| r.examinations.iter().max_by_key(|e| e.sequence))
            .cloned())
    }

    async fn append_examination(
        &self,
        patient_id: Uuid,
        notes: String,
    ) -> Result<ExaminationNote, StorageError> {
        let mut inner = self.inner.write().await;
        let records = inner.records_mut(patient_id)?;
        let note = ExaminationNote {
            id: Uuid::new_v4(),
            patient_id,
            notes,
            sequence: next_sequence(&records.examinations),
            created_at: jiff::Timestamp::now(),
        };
        records.examinations.push(note.clone());
        Ok(note)
    }

    async fn list_joint_observations(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<JointObservation>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records(patient_id)
            .map(|r| r.joints.clone())
            .unwrap_or_default())
    }

    async fn append_joint_observations(
        &self,
        patient_id: Uuid,
        observations: Vec<NewJointObservation>,
    ) -> Result<Vec<JointObservation>, StorageError> {
        let mut inner = self.inner.write().await;
        let records = inner.records_mut(patient_id)?;
        let now = jiff::Timestamp::now();
        let first = next_sequence(&records.joints);
        let created: Vec<JointObservation> = observations
            .into_iter()
            .zip(first..)
            .map(|(obs, seq)| obs.into_observation(patient_id, seq, now))
            .collect();
        records.joints.extend(created.iter().cloned());
        Ok(created)
    }

    async fn latest_score(&self, patient_id: Uuid) -> Result<Option<ScoreResult>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records(patient_id)
            .and_then(|r| r.scores.iter().max_by_key(|s| s.sequence))
            .cloned())
    }

    async fn append_score(
        &self,
        patient_id: Uuid,
        inputs: Das28Inputs,
        score: f64,
    ) -> Result<ScoreResult, StorageError> {
        let mut inner = self.inner.write().await;
        let records = inner.records_mut(patient_id)?;
        let result = ScoreResult {
            id: Uuid::new_v4(),
            patient_id,
            inputs,
            score,
            sequence: next_sequence(&records.scores),
            created_at: jiff::Timestamp::now(),
        };
        records.scores.push(result.clone());
        Ok(result)
    }
}
