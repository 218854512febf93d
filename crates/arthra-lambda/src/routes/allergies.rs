use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arthra_core::models::allergy::{AllergyEntry, AllergyKind, NewAllergy};
use arthra_storage::PatientStore;

use crate::error::ApiError;
use crate::routes::require_patient;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AllergiesRequest {
    pub patient_id: Option<Uuid>,
    #[serde(default)]
    pub entries: Vec<AllergyEntryRequest>,
}

#[derive(Deserialize)]
pub struct AllergyEntryRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct AllergiesResponse {
    pub added: Vec<AllergyEntry>,
}

/// Append allergy/addiction entries. Entries without a type or description
/// are skipped; an unrecognised type rejects the whole request.
pub async fn add_allergies<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<AllergiesRequest>,
) -> Result<(StatusCode, Json<AllergiesResponse>), ApiError> {
    let patient_id = match req.patient_id {
        Some(id) if !req.entries.is_empty() => id,
        _ => {
            return Err(ApiError::BadRequest(
                "patient_id and entries required".to_string(),
            ));
        }
    };

    let mut entries = Vec::new();
    for entry in req.entries {
        let (Some(kind), Some(description)) = (entry.kind, entry.description) else {
            continue;
        };
        if kind.trim().is_empty() || description.trim().is_empty() {
            continue;
        }
        entries.push(NewAllergy {
            kind: kind.parse::<AllergyKind>()?,
            description,
        });
    }

    require_patient(state.store.as_ref(), patient_id).await?;

    let added = if entries.is_empty() {
        Vec::new()
    } else {
        state.store.append_allergies(patient_id, entries).await?
    };
    tracing::info!(patient_id = %patient_id, added = added.len(), "allergies recorded");

    Ok((StatusCode::CREATED, Json(AllergiesResponse { added })))
}
