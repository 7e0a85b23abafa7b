//! CLI library for testing purposes

pub mod logging;
pub mod overrides;
pub mod report;

pub use overrides::CliOverrides;
pub use report::{ReportFormat, render_json, render_text};
