use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::payment::PaymentStatus;
use crate::state::AppState;
use crate::store::drafts::{self, Draft};
use crate::store::saved::{self, SavedResumeRow};

/// PUT /api/v1/drafts/:client_id
pub async fn handle_save_draft(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(draft): Json<Draft>,
) -> Result<StatusCode, AppError> {
    drafts::save_draft(&state.redis, &client_id, &draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/drafts/:client_id
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Draft>, AppError> {
    let draft = drafts::load_draft(&state.redis, &client_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No draft for client {client_id}")))?;
    Ok(Json(draft))
}

/// DELETE /api/v1/drafts/:client_id
pub async fn handle_delete_draft(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<StatusCode, AppError> {
    drafts::delete_draft(&state.redis, &client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeRequest {
    pub client_id: String,
    pub name: String,
    pub payment_id: String,
    pub resume_data: ResumeData,
}

/// POST /api/v1/resumes/saved
///
/// Saving is payment-gated: the charge must be confirmed with the provider
/// before anything is written. A confirmed save also clears the draft.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<(StatusCode, Json<SavedResumeRow>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let status = state.payments.payment_status(&req.payment_id).await?;
    if status != PaymentStatus::Succeeded {
        return Err(AppError::Validation(
            "payment has not been confirmed".to_string(),
        ));
    }

    let row = saved::save_resume(
        &state.db,
        &state.s3,
        &state.config.s3_bucket,
        &req.client_id,
        &req.name,
        &req.payment_id,
        &req.resume_data,
    )
    .await?;

    // The draft has served its purpose; a failure here must not fail the save.
    if let Err(e) = drafts::delete_draft(&state.redis, &req.client_id).await {
        warn!("failed to clear draft after save: {e}");
    }

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes/saved/:client_id
pub async fn handle_list_saved(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<SavedResumeRow>>, AppError> {
    let rows = saved::list_saved(&state.db, &client_id).await?;
    Ok(Json(rows))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResumeResponse {
    #[serde(flatten)]
    pub meta: SavedResumeRow,
    pub resume_data: ResumeData,
}

/// GET /api/v1/resumes/saved/:client_id/:id
pub async fn handle_get_saved(
    State(state): State<AppState>,
    Path((client_id, id)): Path<(String, Uuid)>,
) -> Result<Json<SavedResumeResponse>, AppError> {
    let row = saved::find_saved(&state.db, &client_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Saved resume {id} not found")))?;
    let resume_data = saved::load_document(&state.s3, &state.config.s3_bucket, &row).await?;
    Ok(Json(SavedResumeResponse {
        meta: row,
        resume_data,
    }))
}

/// DELETE /api/v1/resumes/saved/:client_id/:id
pub async fn handle_delete_saved(
    State(state): State<AppState>,
    Path((client_id, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    let row = saved::find_saved(&state.db, &client_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Saved resume {id} not found")))?;
    saved::delete_saved(&state.db, &state.s3, &state.config.s3_bucket, &row).await?;
    Ok(StatusCode::NO_CONTENT)
}
