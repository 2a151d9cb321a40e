pub mod page;
pub mod resume;
