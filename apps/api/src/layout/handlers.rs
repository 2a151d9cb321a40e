use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::models::page::PageDocument;
use crate::models::resume::ResumeData;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PaginateResponse {
    pub pages: Vec<PageDocument>,
}

/// POST /api/v1/resumes/paginate
///
/// Always answers 200: pagination degrades to a single full page on any
/// internal failure, so there is no error surface to expose.
pub async fn paginate_resume(
    State(state): State<AppState>,
    Json(document): Json<ResumeData>,
) -> Json<PaginateResponse> {
    let pages = state.paginator.paginate(&document).await;
    info!(pages = pages.len(), "paginated resume");
    Json(PaginateResponse { pages })
}
