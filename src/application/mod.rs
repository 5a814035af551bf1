//! Application layer - use cases and orchestration.
//!
//! This layer contains the extraction, formatting and export logic.

pub mod exporter;
pub mod extractor;
pub mod formatter;
pub mod parser;

pub use exporter::run_export;
pub use formatter::format_summary;
