use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::ai::GeminiClient;
use crate::config::Config;
use crate::layout::{MetricsSurface, Paginator};
use crate::payment::PaymentGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: RedisClient,
    pub s3: S3Client,
    pub ai: GeminiClient,
    /// Pluggable Pix gateway. Production wires Mercado Pago.
    pub payments: Arc<dyn PaymentGateway>,
    pub paginator: Arc<Paginator<MetricsSurface>>,
    pub config: Config,
}
