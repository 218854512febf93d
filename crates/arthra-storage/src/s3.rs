use aws_sdk_s3::Client;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use arthra_core::models::allergy::{AllergyEntry, NewAllergy};
use arthra_core::models::examination::ExaminationNote;
use arthra_core::models::joint::{JointObservation, NewJointObservation};
use arthra_core::models::patient::{NewPatient, Patient};
use arthra_core::models::score::{Das28Inputs, ScoreResult};
use arthra_core::s3_keys;

use crate::error::StorageError;
use crate::objects::{self, WriteCondition};
use crate::state;
use crate::store::{latest_by_sequence, PatientStore};

/// Attempts per append before a lost optimistic-lock race is reported.
const MAX_APPEND_ATTEMPTS: usize = 5;

/// S3-backed store. Each patient collection is one JSON array; appends are
/// read-modify-write cycles guarded by the object's ETag.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    async fn require_patient(&self, patient_id: Uuid) -> Result<(), StorageError> {
        match self.get_patient(patient_id).await? {
            Some(_) => Ok(()),
            None => Err(StorageError::PatientNotFound { id: patient_id }),
        }
    }

    async fn load_collection<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<(Vec<T>, WriteCondition), StorageError> {
        match state::load_state_opt::<Vec<T>>(&self.client, &self.bucket, key).await? {
            Some(loaded) => Ok((loaded.value, WriteCondition::IfMatch(loaded.etag))),
            None => Ok((Vec::new(), WriteCondition::IfAbsent)),
        }
    }

    async fn list_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        Ok(self.load_collection(key).await?.0)
    }

    /// Append the records produced by `make` to the collection at `key`.
    ///
    /// `make` receives the sequence number of the first new record and is
    /// called again if a concurrent writer invalidates the loaded ETag.
    async fn append<T, F>(&self, key: &str, mut make: F) -> Result<Vec<T>, StorageError>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync,
        F: FnMut(u64) -> Vec<T> + Send,
    {
        for attempt in 1..=MAX_APPEND_ATTEMPTS {
            let (mut records, condition) = self.load_collection::<T>(key).await?;
            let created = make(records.len() as u64 + 1);
            records.extend(created.iter().cloned());

            match state::save_state_conditional(
                &self.client,
                &self.bucket,
                key,
                &records,
                &condition,
            )
            .await
            {
                Ok(_) => return Ok(created),
                Err(StorageError::PreconditionFailed { .. }) => {
                    tracing::warn!(key, attempt, "concurrent append detected, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(StorageError::AppendConflict {
            key: key.to_string(),
            attempts: MAX_APPEND_ATTEMPTS,
        })
    }
}

impl PatientStore for S3Store {
    async fn create_patient(&self, patient: NewPatient) -> Result<Patient, StorageError> {
        let patient = patient.into_patient(Uuid::new_v4(), jiff::Timestamp::now());
        state::save_state_conditional(
            &self.client,
            &self.bucket,
            &s3_keys::patient(patient.id),
            &patient,
            &WriteCondition::IfAbsent,
        )
        .await?;
        tracing::debug!(patient_id = %patient.id, "patient created");
        Ok(patient)
    }

    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>, StorageError> {
        let loaded =
            state::load_state_opt::<Patient>(&self.client, &self.bucket, &s3_keys::patient(id))
                .await?;
        Ok(loaded.map(|loaded| loaded.value))
    }

    async fn search_patients(&self, query: &str) -> Result<Vec<Patient>, StorageError> {
        let keys =
            objects::list_keys(&self.client, &self.bucket, s3_keys::PATIENTS_PREFIX).await?;

        let mut patients = Vec::new();
        for key in keys.iter().filter(|k| s3_keys::is_patient_key(k)) {
            let patient = state::load_state::<Patient>(&self.client, &self.bucket, key)
                .await?
                .value;
            if patient.matches(query) {
                patients.push(patient);
            }
        }
        patients.sort_by_key(|p| p.created_at);
        Ok(patients)
    }

    async fn list_allergies(&self, patient_id: Uuid) -> Result<Vec<AllergyEntry>, StorageError> {
        let mut entries: Vec<AllergyEntry> =
            self.list_collection(&s3_keys::allergies(patient_id)).await?;
        entries.sort_by_key(|e| e.sequence);
        Ok(entries)
    }

    async fn append_allergies(
        &self,
        patient_id: Uuid,
        entries: Vec<NewAllergy>,
    ) -> Result<Vec<AllergyEntry>, StorageError> {
        self.require_patient(patient_id).await?;
        let now = jiff::Timestamp::now();
        self.append(&s3_keys::allergies(patient_id), |first| {
            entries
                .iter()
                .cloned()
                .zip(first..)
                .map(|(entry, seq)| entry.into_entry(patient_id, seq, now))
                .collect()
        })
        .await
    }

    async fn latest_examination(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<ExaminationNote>, StorageError> {
        let notes: Vec<ExaminationNote> =
            self.list_collection(&s3_keys::examinations(patient_id)).await?;
        Ok(latest_by_sequence(notes, |n| n.sequence))
    }

    async fn append_examination(
        &self,
        patient_id: Uuid,
        notes: String,
    ) -> Result<ExaminationNote, StorageError> {
        self.require_patient(patient_id).await?;
        let now = jiff::Timestamp::now();
        let mut created = self
            .append(&s3_keys::examinations(patient_id), |sequence| {
                vec![ExaminationNote {
                    id: Uuid::new_v4(),
                    patient_id,
                    notes: notes.clone(),
                    sequence,
                    created_at: now,
                }]
            })
            .await?;
        created
            .pop()
            .ok_or_else(|| StorageError::PutObject("examination append produced no record".to_string()))
    }

    async fn list_joint_observations(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<JointObservation>, StorageError> {
        let mut observations: Vec<JointObservation> =
            self.list_collection(&s3_keys::joints(patient_id)).await?;
        observations.sort_by_key(|o| o.sequence);
        Ok(observations)
    }

    async fn append_joint_observations(
        &self,
        patient_id: Uuid,
        observations: Vec<NewJointObservation>,
    ) -> Result<Vec<JointObservation>, StorageError> {
        self.require_patient(patient_id).await?;
        let now = jiff::Timestamp::now();
        self.append(&s3_keys::joints(patient_id), |first| {
            observations
                .iter()
                .cloned()
                .zip(first..)
                .map(|(obs, seq)| obs.into_observation(patient_id, seq, now))
                .collect()
        })
        .await
    }

    async fn latest_score(&self, patient_id: Uuid) -> Result<Option<ScoreResult>, StorageError> {
        let results: Vec<ScoreResult> = self.list_collection(&s3_keys::scores(patient_id)).await?;
        Ok(latest_by_sequence(results, |r| r.sequence))
    }

    async fn append_score(
        &self,
        patient_id: Uuid,
        inputs: Das28Inputs,
        score: f64,
    ) -> Result<ScoreResult, StorageError> {
        self.require_patient(patient_id).await?;
        let now = jiff::Timestamp::now();
        let mut created = self
            .append(&s3_keys::scores(patient_id), |sequence| {
                vec![ScoreResult {
                    id: Uuid::new_v4(),
                    patient_id,
                    inputs,
                    score,
                    sequence,
                    created_at: now,
                }]
            })
            .await?;
        created
            .pop()
            .ok_or_else(|| StorageError::PutObject("score append produced no record".to_string()))
    }
}
