//! Export coordination: drives a page renderer over a paginated document,
//! one page at a time, with guaranteed teardown.
//!
//! Rendering backends are heavyweight (a headless browser or a PDF engine),
//! so only one export may run at a time per coordinator.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::page::PageDocument;
use crate::models::resume::ResumeData;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error("nothing to export: document produced no pages")]
    NoPages,

    #[error("renderer error: {0}")]
    Renderer(String),
}

/// A backend that turns page documents into a final artifact.
///
/// Contract: `begin` is called once, then `render_page` once per page in
/// order, then `finish`. `teardown` is ALWAYS called afterwards, whether the
/// sequence succeeded or failed partway.
#[async_trait]
pub trait PageRenderer: Send {
    async fn begin(&mut self, document: &ResumeData) -> Result<(), ExportError>;
    async fn render_page(
        &mut self,
        page: &PageDocument,
        index: usize,
        total: usize,
    ) -> Result<(), ExportError>;
    async fn finish(&mut self) -> Result<Bytes, ExportError>;
    async fn teardown(&mut self);
}

#[derive(Default)]
pub struct ExportCoordinator {
    busy: AtomicBool,
}

impl ExportCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Runs a full export. Rejects re-entrant calls instead of queueing them;
    /// the caller retries once the current export settles.
    pub async fn export<R: PageRenderer>(
        &self,
        renderer: &mut R,
        document: &ResumeData,
        pages: &[PageDocument],
    ) -> Result<Bytes, ExportError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(ExportError::Busy);
        }

        let result = self.drive(renderer, document, pages).await;

        // Teardown and flag release happen on every path out of `drive`.
        renderer.teardown().await;
        self.busy.store(false, Ordering::SeqCst);

        if let Ok(bytes) = &result {
            info!(pages = pages.len(), size = bytes.len(), "export finished");
        }
        result
    }

    async fn drive<R: PageRenderer>(
        &self,
        renderer: &mut R,
        document: &ResumeData,
        pages: &[PageDocument],
    ) -> Result<Bytes, ExportError> {
        if pages.is_empty() {
            return Err(ExportError::NoPages);
        }

        renderer.begin(document).await?;
        for (index, page) in pages.iter().enumerate() {
            debug!(index, "rendering page");
            renderer.render_page(page, index, pages.len()).await?;
        }
        renderer.finish().await
    }
}
