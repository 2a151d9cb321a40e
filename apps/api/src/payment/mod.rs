//! Pix payment gateway. Mercado Pago is the only implementation; the trait
//! exists so handlers and the save flow can be tested without the provider.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::backoff::{is_retryable, retry_delay, MAX_ATTEMPTS};

pub mod handlers;

const MERCADO_PAGO_API_URL: &str = "https://api.mercadopago.com/v1/payments";
/// Pix charges expire after ten minutes, matching the checkout timer.
const EXPIRATION_MINUTES: i64 = 10;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("provider response missing Pix transaction data")]
    MissingTransactionData,

    #[error("rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// Price tiers in BRL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountTier {
    Standard,
    Discounted,
}

impl AmountTier {
    pub fn amount_brl(self) -> f64 {
        match self {
            AmountTier::Standard => 5.00,
            AmountTier::Discounted => 2.50,
        }
    }
}

/// A freshly created Pix charge, ready for the checkout screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixCharge {
    pub payment_id: String,
    /// Base64 QR code wrapped as a PNG data URL.
    pub qr_code_url: String,
    pub copy_paste_code: String,
}

/// Provider-agnostic payment state. Terminal provider statuses that are not
/// approval map to `Error` so polling clients can stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Error,
}

impl PaymentStatus {
    fn from_provider(status: &str) -> Self {
        match status {
            "approved" => PaymentStatus::Succeeded,
            "rejected" | "cancelled" | "expired" => PaymentStatus::Error,
            _ => PaymentStatus::Pending,
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_pix_charge(&self, tier: AmountTier) -> Result<PixCharge, PaymentError>;
    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, PaymentError>;
}

#[derive(Debug, Deserialize)]
struct MpPayment {
    id: Option<serde_json::Number>,
    #[serde(default)]
    status: String,
    point_of_interaction: Option<MpPointOfInteraction>,
}

#[derive(Debug, Deserialize)]
struct MpPointOfInteraction {
    transaction_data: Option<MpTransactionData>,
}

#[derive(Debug, Deserialize)]
struct MpTransactionData {
    qr_code_base64: Option<String>,
    qr_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MpError {
    #[serde(default)]
    message: String,
}

/// Mercado Pago Pix gateway. Retries transient provider failures with the
/// shared backoff policy.
#[derive(Clone)]
pub struct MercadoPagoGateway {
    client: Client,
    access_token: String,
}

impl MercadoPagoGateway {
    pub fn new(access_token: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            access_token,
        }
    }

    async fn send_with_retry(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, PaymentError> {
        let mut last_error: Option<PaymentError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = retry_delay(attempt - 1);
                warn!(
                    "payment call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match build().send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(PaymentError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if is_retryable(status) {
                let body = response.text().await.unwrap_or_default();
                warn!("Mercado Pago returned {}: {}", status, body);
                last_error = Some(PaymentError::Provider {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<MpError>(&body)
                    .map(|e| e.message)
                    .unwrap_or(body);
                return Err(PaymentError::Provider {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response);
        }

        Err(last_error.unwrap_or(PaymentError::RateLimited {
            retries: MAX_ATTEMPTS,
        }))
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoGateway {
    async fn create_pix_charge(&self, tier: AmountTier) -> Result<PixCharge, PaymentError> {
        // No payer email is collected before checkout; the provider requires
        // one, so a unique synthetic address is generated per charge.
        let payer_email = format!("pagamento-{}@velcurriculo.com", Utc::now().timestamp_millis());
        let expiration = Utc::now() + Duration::minutes(EXPIRATION_MINUTES);
        let body = json!({
            "transaction_amount": tier.amount_brl(),
            "description": "Download de Currículo Profissional",
            "payment_method_id": "pix",
            "date_of_expiration": expiration.to_rfc3339(),
            "payer": { "email": payer_email },
        });

        let response = self
            .send_with_retry(|| {
                self.client
                    .post(MERCADO_PAGO_API_URL)
                    .bearer_auth(&self.access_token)
                    .json(&body)
            })
            .await?;

        let payment: MpPayment = response.json().await?;
        let id = payment
            .id
            .ok_or(PaymentError::MissingTransactionData)?
            .to_string();
        let data = payment
            .point_of_interaction
            .and_then(|p| p.transaction_data)
            .ok_or(PaymentError::MissingTransactionData)?;
        let qr_base64 = data.qr_code_base64.ok_or(PaymentError::MissingTransactionData)?;
        let copy_paste = data.qr_code.ok_or(PaymentError::MissingTransactionData)?;

        info!(payment_id = %id, amount = tier.amount_brl(), "created Pix charge");

        Ok(PixCharge {
            payment_id: id,
            qr_code_url: format!("data:image/png;base64,{qr_base64}"),
            copy_paste_code: copy_paste,
        })
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, PaymentError> {
        let url = format!("{MERCADO_PAGO_API_URL}/{payment_id}");
        let response = self
            .send_with_retry(|| self.client.get(&url).bearer_auth(&self.access_token))
            .await?;
        let payment: MpPayment = response.json().await?;
        Ok(PaymentStatus::from_provider(&payment.status))
    }
}
