pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::ai::handlers as ai_handlers;
use crate::errors::AppError;
use crate::layout::handlers as layout_handlers;
use crate::payment::handlers as payment_handlers;
use crate::state::AppState;
use crate::store::handlers as store_handlers;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Layout API
        .route(
            "/api/v1/resumes/paginate",
            post(layout_handlers::paginate_resume),
        )
        // AI API
        .route(
            "/api/v1/ai/enhance-text",
            post(ai_handlers::handle_enhance_text),
        )
        .route(
            "/api/v1/ai/suggest-skills",
            post(ai_handlers::handle_suggest_skills),
        )
        .route(
            "/api/v1/ai/import/work-history",
            post(ai_handlers::handle_import_work_history),
        )
        .route(
            "/api/v1/ai/import/resume",
            post(ai_handlers::handle_import_resume),
        )
        // Payment API
        .route(
            "/api/v1/payments/pix",
            post(payment_handlers::handle_create_pix),
        )
        .route(
            "/api/v1/payments/status",
            get(payment_handlers::handle_payment_status),
        )
        // Draft API
        .route(
            "/api/v1/drafts/:client_id",
            put(store_handlers::handle_save_draft)
                .get(store_handlers::handle_get_draft)
                .delete(store_handlers::handle_delete_draft),
        )
        // Saved resume API
        .route(
            "/api/v1/resumes/saved",
            post(store_handlers::handle_save_resume),
        )
        .route(
            "/api/v1/resumes/saved/:client_id",
            get(store_handlers::handle_list_saved),
        )
        .route(
            "/api/v1/resumes/saved/:client_id/:id",
            get(store_handlers::handle_get_saved).delete(store_handlers::handle_delete_saved),
        )
        // Export API (server-side rendering backend lands next phase)
        .route("/api/v1/resumes/export", post(not_implemented))
        .route("/api/v1/resumes/export/:job_id", delete(not_implemented))
        .with_state(state)
}
