use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::payment::{AmountTier, PaymentStatus, PixCharge};
use crate::state::AppState;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePixRequest {
    pub is_discounted: bool,
}

/// POST /api/v1/payments/pix
pub async fn handle_create_pix(
    State(state): State<AppState>,
    Json(req): Json<CreatePixRequest>,
) -> Result<Json<PixCharge>, AppError> {
    let tier = if req.is_discounted {
        AmountTier::Discounted
    } else {
        AmountTier::Standard
    };
    let charge = state.payments.create_pix_charge(tier).await?;
    Ok(Json(charge))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub payment_id: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: PaymentStatus,
}

/// GET /api/v1/payments/status?paymentId=...
pub async fn handle_payment_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StatusResponse>, AppError> {
    if query.payment_id.trim().is_empty() {
        return Err(AppError::Validation("paymentId is required".to_string()));
    }
    let status = state.payments.payment_status(&query.payment_id).await?;
    Ok(Json(StatusResponse { status }))
}
