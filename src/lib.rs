pub mod config;
pub mod error;
pub mod logger;
pub mod plan;
pub mod report;
pub mod results;

// Re-export commonly used types
pub use error::{ReportError, Result};
