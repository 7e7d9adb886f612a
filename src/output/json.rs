//! JSON serialization for result records.

use serde::Serialize;

/// Serialize a result record to a compact JSON string.
///
/// Undefined statistics carried as NaN serialize as `null`.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for the
/// record types in this crate).
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize a result record to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for the
/// record types in this crate).
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
