//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::screening::catalog::{catalog, Catalog};
use crate::screening::document::UploadedDocument;
use crate::screening::export::{
    export_bundle, to_csv, to_csv_with, ExportLayout, BUNDLE_FILE_NAME, CSV_FILE_NAME,
};
use crate::screening::pipeline::{run_screening, ScreeningBatch, ScreeningRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Bundle,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub layout: ExportLayout,
}

/// Reads the multipart form shared by the screening and export endpoints.
///
/// Fields: `files` (repeated file parts), `job_description`, `keywords`
/// (comma-separated), and repeated `skills`, `certifications`, `education`.
async fn read_screening_request(mut multipart: Multipart) -> Result<ScreeningRequest, AppError> {
    let mut request = ScreeningRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("upload_{}", request.documents.len() + 1));
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                debug!("Received {file_name} ({} bytes, {content_type:?})", bytes.len());
                request
                    .documents
                    .push(UploadedDocument::new(file_name, content_type.as_deref(), bytes));
            }
            "job_description" => request.job_description = field.text().await?,
            "keywords" => request.selections.keywords = field.text().await?,
            "skills" => request.selections.skills.push(field.text().await?),
            "certifications" => request.selections.certifications.push(field.text().await?),
            "education" => request.selections.education.push(field.text().await?),
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    if request.documents.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one file (field 'files')".to_string(),
        ));
    }
    Ok(request)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
///
/// Skills, certifications (by category) and education levels offered as checklist options.
pub async fn handle_catalog() -> Json<Catalog> {
    Json(catalog())
}

/// POST /api/v1/screenings
///
/// Screens every uploaded file and returns one result per file, in upload order.
/// Unreadable files come back with an `error` tag instead of failing the request.
pub async fn handle_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningBatch>, AppError> {
    let request = read_screening_request(multipart).await?;
    let batch = run_screening(request, state.options).await;
    Ok(Json(batch))
}

/// POST /api/v1/screenings/export?format=csv|bundle&layout=dual|full_text
///
/// Same form as `/screenings`; answers with a CSV download or a zip holding the CSV
/// plus one `resume_<n>.txt` per file.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let request = read_screening_request(multipart).await?;
    let batch = run_screening(request, state.options).await;

    let response = match query.format {
        ExportFormat::Csv => {
            let csv = match query.layout {
                ExportLayout::Dual => to_csv(&batch.results),
                layout => to_csv_with(&batch.results, layout),
            };
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, attachment(CSV_FILE_NAME)),
                ],
                csv,
            )
                .into_response()
        }
        ExportFormat::Bundle => {
            let bytes = export_bundle(&batch.results, query.layout)?;
            (
                [
                    (header::CONTENT_TYPE, "application/zip".to_string()),
                    (header::CONTENT_DISPOSITION, attachment(BUNDLE_FILE_NAME)),
                ],
                bytes,
            )
                .into_response()
        }
    };
    Ok(response)
}

fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}
