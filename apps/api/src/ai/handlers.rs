use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::services;
use crate::errors::AppError;
use crate::models::resume::{Experience, ResumeData};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EnhanceRequest {
    pub prompt: String,
}

#[derive(Serialize)]
pub struct EnhanceResponse {
    pub text: String,
}

/// POST /api/v1/ai/enhance-text
pub async fn handle_enhance_text(
    State(state): State<AppState>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if req.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt is required".to_string()));
    }
    let text = services::enhance_text(&state.ai, &req.prompt).await?;
    Ok(Json(EnhanceResponse { text }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestSkillsRequest {
    pub job_title: String,
    #[serde(default)]
    pub experience: String,
}

#[derive(Serialize)]
pub struct SuggestSkillsResponse {
    pub skills: Vec<String>,
}

/// POST /api/v1/ai/suggest-skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Json(req): Json<SuggestSkillsRequest>,
) -> Result<Json<SuggestSkillsResponse>, AppError> {
    let skills = services::suggest_skills(&state.ai, &req.job_title, &req.experience).await?;
    Ok(Json(SuggestSkillsResponse { skills }))
}

#[derive(Serialize)]
pub struct WorkHistoryResponse {
    pub experiences: Vec<Experience>,
}

/// POST /api/v1/ai/import/work-history
///
/// Accepts a Carteira de Trabalho Digital PDF as a multipart `file` field and
/// returns the work-experience entries found in it.
pub async fn handle_import_work_history(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<WorkHistoryResponse>, AppError> {
    let full_text = extract_pdf_text(multipart).await?;
    let experiences = services::extract_work_history(&state.ai, &full_text).await?;
    info!(count = experiences.len(), "imported work history from PDF");
    Ok(Json(WorkHistoryResponse { experiences }))
}

/// POST /api/v1/ai/import/resume
///
/// Accepts an existing resume PDF as a multipart `file` field and returns a
/// full document with fresh item ids.
pub async fn handle_import_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeData>, AppError> {
    let full_text = extract_pdf_text(multipart).await?;
    let document = services::extract_resume(&state.ai, &full_text).await?;
    Ok(Json(document))
}

/// Pulls the first `file` field out of the multipart body and extracts its
/// text. Parsing runs on the blocking pool.
async fn extract_pdf_text(mut multipart: Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("pdf task panicked: {e}")))?
            .map_err(|e| AppError::Validation(format!("could not read PDF: {e}")))?;

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "PDF contains no extractable text".to_string(),
            ));
        }
        return Ok(text);
    }

    Err(AppError::Validation("missing file field".to_string()))
}
