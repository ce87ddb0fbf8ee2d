pub mod store;
pub mod types;

pub use store::{load_results, parse_results};
pub use types::{ExportSummary, KeySource, ResultRecord, ResultStatus, ResultStore};
