use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arthra_core::models::patient::{NewPatient, Patient};
use arthra_storage::PatientStore;

use crate::error::ApiError;
use crate::routes::require_patient;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `YYYY-MM-DD`.
    pub dob: Option<String>,
    pub gender: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedPatient {
    pub id: Uuid,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

pub async fn create_patient<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<CreatedPatient>), ApiError> {
    let new = NewPatient::from_parts(req.first_name, req.last_name, req.dob, req.gender)?;
    let patient = state.store.create_patient(new).await?;
    tracing::info!(patient_id = %patient.id, "patient registered");
    Ok((StatusCode::CREATED, Json(CreatedPatient { id: patient.id })))
}

pub async fn search_patients<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = state.store.search_patients(&query.search).await?;
    Ok(Json(patients))
}

pub async fn get_patient<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let patient = require_patient(state.store.as_ref(), id).await?;
    Ok(Json(patient))
}
