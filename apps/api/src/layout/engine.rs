//! Pagination engine: measurement, extraction and packing behind a
//! fail-soft facade, plus a debounced scheduler for interactive editing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::layout::blocks;
use crate::layout::geometry::PageGeometry;
use crate::layout::measure::{LayoutError, MeasurementSurface};
use crate::layout::paginate::pack;
use crate::models::page::PageDocument;
use crate::models::resume::ResumeData;

/// Quiet period after the last edit before a pagination run starts.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Measures a document and packs it into pages.
///
/// Pagination is advisory: any failure degrades to a single page holding the
/// whole document rather than surfacing an error to the caller.
pub struct Paginator<S> {
    surface: S,
    geometry: PageGeometry,
}

impl<S: MeasurementSurface> Paginator<S> {
    pub fn new(surface: S) -> Self {
        Paginator {
            surface,
            geometry: PageGeometry::default(),
        }
    }

    pub fn with_geometry(surface: S, geometry: PageGeometry) -> Self {
        Paginator { surface, geometry }
    }

    /// Never fails: measurement or extraction errors fall back to a single
    /// page carrying the full document.
    pub async fn paginate(&self, document: &ResumeData) -> Vec<PageDocument> {
        match self.try_paginate(document).await {
            Ok(pages) => pages,
            Err(err) => {
                warn!(error = %err, "pagination failed, falling back to a single page");
                vec![PageDocument::from_full(document)]
            }
        }
    }

    async fn try_paginate(&self, document: &ResumeData) -> Result<Vec<PageDocument>, LayoutError> {
        let rendered = self.surface.measure(document).await?;

        // Escape hatch: content that fits one physical page skips block
        // extraction entirely.
        if rendered.total_height <= self.geometry.page_height {
            debug!(total_height = rendered.total_height, "document fits a single page");
            return Ok(vec![PageDocument::from_full(document)]);
        }

        let blocks = blocks::extract(&rendered, document)?;
        let initial_height = rendered.header_height + rendered.body_margin_top;
        Ok(pack(&blocks, document, initial_height, &self.geometry))
    }
}

/// Latest pagination result, tagged with the run that produced it.
#[derive(Debug, Clone, Default)]
pub struct PaginationUpdate {
    pub run: u64,
    pub pages: Vec<PageDocument>,
}

/// Debounces edits and guarantees last-submitted-wins: a run that was
/// superseded during its quiet period never starts, and a slow run that was
/// overtaken never overwrites a newer published result.
pub struct PaginationScheduler<S> {
    paginator: Arc<Paginator<S>>,
    next_run: Arc<AtomicU64>,
    published: Arc<AtomicU64>,
    tx: watch::Sender<PaginationUpdate>,
}

impl<S: MeasurementSurface + 'static> PaginationScheduler<S> {
    pub fn new(paginator: Paginator<S>) -> Self {
        let (tx, _) = watch::channel(PaginationUpdate::default());
        PaginationScheduler {
            paginator: Arc::new(paginator),
            next_run: Arc::new(AtomicU64::new(0)),
            published: Arc::new(AtomicU64::new(0)),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PaginationUpdate> {
        self.tx.subscribe()
    }

    /// Schedules a pagination run for `document`. Returns the run id; the
    /// result, if this run is not superseded, arrives on the watch channel.
    pub fn submit(&self, document: ResumeData) -> u64 {
        let run = self.next_run.fetch_add(1, Ordering::SeqCst) + 1;
        let paginator = Arc::clone(&self.paginator);
        let next_run = Arc::clone(&self.next_run);
        let published = Arc::clone(&self.published);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            if next_run.load(Ordering::SeqCst) != run {
                debug!(run, "run superseded during debounce");
                return;
            }

            let pages = paginator.paginate(&document).await;

            // Publish only if no newer run has published meanwhile.
            let mut current = published.load(Ordering::SeqCst);
            loop {
                if run <= current {
                    debug!(run, current, "stale run discarded");
                    return;
                }
                match published.compare_exchange(current, run, Ordering::SeqCst, Ordering::SeqCst) {
                    Ok(_) => break,
                    Err(seen) => current = seen,
                }
            }
            let _ = tx.send(PaginationUpdate { run, pages });
        });

        run
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::{RenderedBody, RenderedResume, RenderedSection};
    use async_trait::async_trait;

    /// Scripted surface: heights come from the fixture, and documents whose
    /// summary is "slow" take a second to measure.
    struct ScriptedSurface {
        total_height: f32,
    }

    #[async_trait]
    impl MeasurementSurface for ScriptedSurface {
        async fn measure(&self, document: &ResumeData) -> Result<RenderedResume, LayoutError> {
            if document.summary == "slow" {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Ok(RenderedResume {
                total_height: self.total_height,
                header_height: 180.0,
                body_margin_top: 20.0,
                sections: vec![RenderedSection {
                    key: blocks::SectionKey::Summary,
                    margin_top: 0.0,
                    title_height: Some(36.0),
                    body: RenderedBody::Paragraph(self.total_height - 236.0),
                }],
            })
        }
    }

    struct FailingSurface;

    #[async_trait]
    impl MeasurementSurface for FailingSurface {
        async fn measure(&self, _document: &ResumeData) -> Result<RenderedResume, LayoutError> {
            Err(LayoutError::Internal("surface unavailable".to_string()))
        }
    }

    fn doc(summary: &str) -> ResumeData {
        ResumeData {
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_short_document_takes_single_page_escape_hatch() {
        let paginator = Paginator::new(ScriptedSurface { total_height: 900.0 });
        let pages = paginator.paginate(&doc("fits")).await;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].summary.as_deref(), Some("fits"));
        assert!(pages[0].continuation.is_empty());
    }

    #[tokio::test]
    async fn test_tall_document_is_split_across_pages() {
        let paginator = Paginator::new(ScriptedSurface { total_height: 1600.0 });
        let pages = paginator.paginate(&doc("tall")).await;
        assert_eq!(pages.len(), 2);
        assert!(pages[0].continuation.contains_key("summary"));
    }

    #[tokio::test]
    async fn test_measurement_failure_degrades_to_single_full_page() {
        let paginator = Paginator::new(FailingSurface);
        let document = ResumeData {
            summary: "anything".to_string(),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let pages = paginator.paginate(&document).await;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].summary.as_deref(), Some("anything"));
        assert_eq!(pages[0].skills, vec!["Rust".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_coalesce_into_one_run() {
        let scheduler =
            PaginationScheduler::new(Paginator::new(ScriptedSurface { total_height: 900.0 }));
        let mut rx = scheduler.subscribe();

        scheduler.submit(doc("first"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        let last = scheduler.submit(doc("second"));

        rx.changed().await.unwrap();
        let update = rx.borrow().clone();
        assert_eq!(update.run, last);
        assert_eq!(update.pages[0].summary.as_deref(), Some("second"));
        assert!(!rx.has_changed().unwrap(), "superseded run published nothing");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_older_run_never_overwrites_newer_result() {
        let scheduler =
            PaginationScheduler::new(Paginator::new(ScriptedSurface { total_height: 900.0 }));
        let rx = scheduler.subscribe();

        scheduler.submit(doc("slow"));
        // Let the slow run clear its debounce and start measuring.
        tokio::time::sleep(Duration::from_millis(350)).await;
        let newer = scheduler.submit(doc("fast"));

        // Both runs have finished well within two seconds of paused time.
        tokio::time::sleep(Duration::from_secs(2)).await;
        let update = rx.borrow().clone();
        assert_eq!(update.run, newer);
        assert_eq!(update.pages[0].summary.as_deref(), Some("fast"));
    }
}
