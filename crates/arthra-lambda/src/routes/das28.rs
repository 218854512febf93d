use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use arthra_scoring::{parse_inputs, score_inputs, DiseaseActivity};
use arthra_storage::PatientStore;

use crate::error::ApiError;
use crate::routes::require_patient;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Das28Response {
    pub das28_score: f64,
    pub activity: DiseaseActivity,
    pub activity_label: &'static str,
    pub result_id: Uuid,
}

/// Validate the four inputs, score them, and store the result.
///
/// The body is taken as raw JSON so that a missing or non-numeric field is
/// reported by name rather than as a generic deserialization failure.
pub async fn calculate_das28<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Json(body): Json<Value>,
) -> Result<Json<Das28Response>, ApiError> {
    let patient_id = match body.get("patient_id") {
        None | Some(Value::Null) => {
            return Err(ApiError::BadRequest("invalid patient_id: missing".to_string()));
        }
        Some(Value::String(raw)) => raw
            .parse::<Uuid>()
            .map_err(|e| ApiError::BadRequest(format!("invalid patient_id: {e}")))?,
        Some(_) => {
            return Err(ApiError::BadRequest(
                "invalid patient_id: must be a UUID string".to_string(),
            ));
        }
    };

    let inputs = parse_inputs(&body)?;
    let score = score_inputs(&inputs)?;

    require_patient(state.store.as_ref(), patient_id).await?;
    let result = state.store.append_score(patient_id, inputs, score).await?;

    let activity = DiseaseActivity::from_score(result.score);
    tracing::info!(
        patient_id = %patient_id,
        score = result.score,
        activity = activity.label(),
        "das28 recorded"
    );

    Ok(Json(Das28Response {
        das28_score: result.score,
        activity,
        activity_label: activity.label(),
        result_id: result.id,
    }))
}
