use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arthra_core::models::joint::{JointObservation, NewJointObservation};
use arthra_scoring::joints::{joint_counts, JointCounts};
use arthra_storage::PatientStore;

use crate::error::ApiError;
use crate::routes::require_patient;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct JointCountRequest {
    pub patient_id: Option<Uuid>,
    #[serde(default)]
    pub counts: Vec<JointCountEntry>,
}

#[derive(Deserialize)]
pub struct JointCountEntry {
    pub joint_name: Option<String>,
    #[serde(default)]
    pub is_swollen: bool,
    #[serde(default)]
    pub is_tender: bool,
}

#[derive(Serialize)]
pub struct JointCountResponse {
    pub message: &'static str,
    pub data: Vec<JointObservation>,
    /// Tender/swollen counts over the patient's DAS28 joints after this
    /// submission, for pre-filling the score form.
    pub das28_counts: JointCounts,
}

pub async fn record_joint_counts<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<JointCountRequest>,
) -> Result<(StatusCode, Json<JointCountResponse>), ApiError> {
    let patient_id = match req.patient_id {
        Some(id) if !req.counts.is_empty() => id,
        _ => {
            return Err(ApiError::BadRequest(
                "patient_id and counts required".to_string(),
            ));
        }
    };

    let observations = req
        .counts
        .into_iter()
        .map(|entry| match entry.joint_name {
            Some(name) if !name.trim().is_empty() => Ok(NewJointObservation {
                joint_name: name,
                is_swollen: entry.is_swollen,
                is_tender: entry.is_tender,
            }),
            _ => Err(ApiError::BadRequest("joint_name required".to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    require_patient(state.store.as_ref(), patient_id).await?;
    let data = state
        .store
        .append_joint_observations(patient_id, observations)
        .await?;
    let all = state.store.list_joint_observations(patient_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(JointCountResponse {
            message: "Joint counts recorded successfully",
            data,
            das28_counts: joint_counts(&all),
        }),
    ))
}
