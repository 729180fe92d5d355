//! Core data types for the folk document store.
//!
//! Payloads are kept as validated raw JSON so that the bytes a caller
//! stored are exactly the bytes a snapshot writes back out.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Document identity, assigned by the store and never reused
pub type DocId = i64;

/// Opaque document payload (always valid JSON)
pub type Payload = Box<RawValue>;

/// One `{ID, Data}` entry of a snapshot, as written
#[derive(Debug, Serialize)]
pub struct SnapshotRecordRef<'a> {
    #[serde(rename = "ID")]
    pub id: DocId,

    #[serde(rename = "Data")]
    pub data: &'a RawValue,
}

/// One `{ID, Data}` entry of a snapshot, as read back
#[derive(Debug, Deserialize)]
pub struct SnapshotRecord {
    #[serde(rename = "ID")]
    pub id: DocId,

    #[serde(rename = "Data")]
    pub data: Payload,
}

/// Several documents fetched for a listing or a search
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// Number of documents in `hits`
    #[serde(rename = "Count")]
    pub count: usize,

    /// Time spent assembling the listing, in milliseconds
    #[serde(rename = "TimeMs")]
    pub time_ms: f64,

    /// Snapshot-formatted documents (`null` when nothing was requested)
    #[serde(rename = "Hits")]
    pub hits: Payload,
}

/// Parse a string into a payload, rejecting invalid JSON
pub fn payload_from_str(json: &str) -> crate::core::error::Result<Payload> {
    RawValue::from_string(json.to_string())
        .map_err(|e| crate::core::error::FolkError::InvalidPayload(e.to_string()))
}

/// Serialize any value into a payload
pub fn payload_from_value<T: Serialize>(value: &T) -> crate::core::error::Result<Payload> {
    Ok(serde_json::value::to_raw_value(value)?)
}
