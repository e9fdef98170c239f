use crate::error::{PodtrackError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Describe / query shapes
// ---------------------------------------------------------------------------

/// One entry from the record store's schema description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    pub label: String,
}

/// Result of a query. Zero records is a normal outcome (the user has no
/// row for that pod), not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,
    #[serde(default)]
    pub records: Vec<Map<String, Value>>,
}

impl QueryResult {
    /// The single record this domain expects per user per pod, if any.
    pub fn first(&self) -> Option<&Map<String, Value>> {
        self.records.first()
    }
}

/// Pull the record id out of the `attributes.url` the store attaches to
/// each returned record (the id is the last path segment).
pub fn record_id(record: &Map<String, Value>) -> Result<String> {
    record
        .get("attributes")
        .and_then(|a| a.get("url"))
        .and_then(Value::as_str)
        .and_then(|url| url.rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(PodtrackError::MissingRecordId)
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

/// The record-store collaborator. Injected into every pipeline so tests
/// can substitute an in-memory double; no global connection handle.
pub trait RecordStore {
    /// Schema for one record type: field names and display labels.
    fn describe(&self, record_type: &str) -> Result<Vec<FieldMeta>>;

    /// Run a SOQL query.
    fn query(&self, soql: &str) -> Result<QueryResult>;

    /// Write one or more fields on an existing record.
    fn update(
        &self,
        record_type: &str,
        record_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
