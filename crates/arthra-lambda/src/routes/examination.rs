use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arthra_storage::PatientStore;

use crate::error::ApiError;
use crate::routes::require_patient;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ExaminationRequest {
    pub patient_id: Option<Uuid>,
    /// Dictation transcript. May be empty, but must be present.
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct ExaminationResponse {
    pub examination_id: Uuid,
    pub sequence: u64,
}

pub async fn save_examination<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<ExaminationRequest>,
) -> Result<(StatusCode, Json<ExaminationResponse>), ApiError> {
    let (Some(patient_id), Some(notes)) = (req.patient_id, req.notes) else {
        return Err(ApiError::BadRequest(
            "patient_id and notes required".to_string(),
        ));
    };

    require_patient(state.store.as_ref(), patient_id).await?;
    let note = state.store.append_examination(patient_id, notes).await?;

    Ok((
        StatusCode::CREATED,
        Json(ExaminationResponse {
            examination_id: note.id,
            sequence: note.sequence,
        }),
    ))
}
