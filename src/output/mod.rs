//! Serialization and plain-text reporting of results.

mod json;
mod report;

pub use json::{to_json, to_json_pretty};
pub use report::StatisticReporter;
