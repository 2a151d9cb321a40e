//! Measurement surface contract: render a complete (unpaginated) document
//! off-screen and report the pixel geometry of its sections.
//!
//! The block extractor and page packer only ever see a [`RenderedResume`], so
//! the surface behind the trait is swappable: the production implementation
//! estimates geometry from font metrics ([`super::metrics::MetricsSurface`]),
//! tests script exact heights.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::layout::blocks::SectionKey;
use crate::models::resume::ResumeData;

/// Bound on one measurement pass. A surface that has not settled by then
/// reports [`LayoutError::MeasurementTimeout`] and the caller falls back to a
/// single unpaginated page.
pub const RENDER_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("measurement did not settle within {0:?}")]
    MeasurementTimeout(Duration),

    #[error("rendered document missing expected structure: {0}")]
    Extraction(String),

    #[error("measurement task failed: {0}")]
    Internal(String),
}

/// Geometry of one fully rendered, unpaginated document.
///
/// Every height is a "full box": content height plus the element's own
/// vertical margins. Margin collapsing is not modeled.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResume {
    /// Height of the whole rendered document at page width.
    pub total_height: f32,
    /// Header (name/title/contact) box, page-1 only.
    pub header_height: f32,
    /// Top margin of the content container below the header.
    pub body_margin_top: f32,
    /// Sections in rendering order. Sections with no backing data are absent.
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub key: SectionKey,
    /// The section container's own top margin.
    pub margin_top: f32,
    /// Full box height of the section title, when the section renders one.
    pub title_height: Option<f32>,
    pub body: RenderedBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedBody {
    /// Free-flowing paragraph (summary): one splittable box.
    Paragraph(f32),
    /// Per-item geometry (experiences): header + optional description each.
    Entries(Vec<RenderedEntry>),
    /// Whole-section box (education, courses, languages, skills): moves to a
    /// page as one unit, height excludes the title.
    Whole(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEntry {
    /// The backing list item's id.
    pub id: String,
    pub margin_top: f32,
    pub header_height: f32,
    /// Absent when the item has no description text.
    pub description_height: Option<f32>,
}

#[async_trait]
pub trait MeasurementSurface: Send + Sync {
    /// Renders `document` at fixed page width and resolves once geometry has
    /// settled (fonts ready, images loaded or errored).
    async fn measure(&self, document: &ResumeData) -> Result<RenderedResume, LayoutError>;
}

impl RenderedResume {
    pub fn section(&self, key: SectionKey) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.key == key)
    }
}
