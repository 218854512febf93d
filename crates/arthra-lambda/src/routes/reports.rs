use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use arthra_export::{build_report, ExportFormat};
use arthra_storage::PatientStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReportQuery {
    /// `pdf` or `docx`; the configured default when absent.
    pub format: Option<String>,
}

/// Render a patient's report and return it as a file download.
pub async fn generate_report<S: PatientStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let format = match query.format.as_deref() {
        Some(f) => f.parse::<ExportFormat>()?,
        None => state.report_format,
    };

    let document = build_report(state.store.as_ref(), id, format, &state.styles).await?;

    let headers = [
        (header::CONTENT_TYPE, document.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
        ),
    ];
    Ok((headers, document.bytes))
}
