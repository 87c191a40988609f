//! Application services

pub mod context;
pub mod report;

pub use context::ContextService;
pub use report::{Distribution, ReportService};
