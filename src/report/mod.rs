pub mod aggregator;
pub mod export;
pub mod printer;
pub mod types;

pub use aggregator::{build_report, classify};
pub use export::{export_json, to_json};
pub use printer::{ReportFormat, ReportPrinter, render_summary};
pub use types::{CaseReport, Classification, Report, Summary};
