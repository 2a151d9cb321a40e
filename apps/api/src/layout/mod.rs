pub mod blocks;
pub mod engine;
pub mod geometry;
pub mod handlers;
pub mod measure;
pub mod metrics;
pub mod paginate;

pub use engine::{PaginationScheduler, PaginationUpdate, Paginator};
pub use measure::{LayoutError, MeasurementSurface};
pub use metrics::MetricsSurface;
