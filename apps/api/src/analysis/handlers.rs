//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::analysis::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

struct ResumeUpload {
    resume: Bytes,
    job_description: String,
}

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (PDF file, required) and `job_description` (text,
/// optional). Extraction runs on the blocking pool; an unreadable PDF fails the
/// whole request with a single error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let upload = read_upload(&mut multipart).await?;

    let analysis_id = Uuid::new_v4();
    let span = info_span!("analysis", %analysis_id, bytes = upload.resume.len());
    info!(parent: &span, "Resume received");

    let analyzer = state.analyzer.clone();
    let report = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        analyzer.analyze(&upload.resume, &upload.job_description)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))??;

    Ok(Json(report))
}

async fn read_upload(multipart: &mut Multipart) -> Result<ResumeUpload, AppError> {
    let mut resume = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                resume = Some(data);
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid job description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let resume = resume
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    Ok(ResumeUpload {
        resume,
        job_description,
    })
}
