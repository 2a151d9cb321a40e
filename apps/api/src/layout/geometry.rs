//! Fixed page geometry. These constants must stay bit-exact with the preview
//! renderer (A4 at 96 dpi) or split offsets drift visibly across pages.

use serde::{Deserialize, Serialize};

/// A4 page height in pixels at 96 dpi.
pub const A4_PIXEL_HEIGHT: f32 = 1123.0;
/// A4 page width in pixels at 96 dpi; the measurement surface renders at
/// this fixed width regardless of the on-screen preview scale.
pub const A4_PIXEL_WIDTH: f32 = 794.0;
/// Vertical space reserved at the bottom of every page.
pub const BOTTOM_MARGIN: f32 = 56.0;
/// Top margin applied to every page after the first.
pub const CONTINUATION_TOP_MARGIN: f32 = 56.0;
/// A splittable block is never cut if the sliver left on the current page
/// would be shorter than this.
pub const MIN_SPLIT_HEIGHT: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_height: f32,
    pub page_width: f32,
    pub bottom_margin: f32,
    pub continuation_top_margin: f32,
    pub min_split_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            page_height: A4_PIXEL_HEIGHT,
            page_width: A4_PIXEL_WIDTH,
            bottom_margin: BOTTOM_MARGIN,
            continuation_top_margin: CONTINUATION_TOP_MARGIN,
            min_split_height: MIN_SPLIT_HEIGHT,
        }
    }
}

impl PageGeometry {
    /// The content budget of one page: total height minus the bottom margin.
    pub fn content_limit(&self) -> f32 {
        self.page_height - self.bottom_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_a4_at_96dpi() {
        let g = PageGeometry::default();
        assert_eq!(g.page_height, 1123.0);
        assert_eq!(g.page_width, 794.0);
        assert_eq!(g.content_limit(), 1067.0);
        assert_eq!(g.min_split_height, 50.0);
        assert_eq!(g.continuation_top_margin, 56.0);
    }
}
