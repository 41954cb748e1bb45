//! Transfer - JSON-compatible export/import document.
//!
//! The store produces and consumes in-memory documents; writing them to a
//! file (or a download link) is the caller's concern. Wire shape:
//!
//! ```json
//! {
//!   "version": 1,
//!   "databaseName": "contacts",
//!   "exportedAt": "2026-08-07T12:00:00Z",
//!   "count": 2,
//!   "records": [ { "id": 1, "created": "…", "updated": "…", "name": "Ann" } ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record::{FieldMap, Record};
use crate::schema::Schema;

/// Snapshot of a store plus export metadata. `count` always equals
/// `records.len()` when produced by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: u32,
    pub database_name: String,
    pub exported_at: DateTime<Utc>,
    pub count: usize,
    pub records: Vec<Record>,
}

impl ExportDocument {
    pub(crate) fn new(schema: &Schema, records: Vec<Record>) -> Self {
        ExportDocument {
            version: schema.version(),
            database_name: schema.name().to_string(),
            exported_at: Utc::now(),
            count: records.len(),
            records,
        }
    }

    /// Parse an import document. A document lacking a `records` array is
    /// rejected before any store is touched; other shape mismatches map to
    /// `Validation` as well.
    pub fn from_value(value: serde_json::Value) -> Result<Self, StoreError> {
        match value.get("records") {
            Some(serde_json::Value::Array(_)) => {}
            _ => {
                return Err(StoreError::Validation(
                    "import document has no records array".into(),
                ))
            }
        }
        let document: ExportDocument = serde_json::from_value(value)
            .map_err(|err| StoreError::Validation(format!("malformed import document: {}", err)))?;
        if document.count != document.records.len() {
            tracing::warn!(
                count = document.count,
                records = document.records.len(),
                "import document count does not match records"
            );
        }
        Ok(document)
    }

    /// Candidate field maps for `import_batch`: the records stripped of
    /// their ids and timestamps (the importing store assigns fresh ones).
    pub fn candidates(&self) -> Vec<FieldMap> {
        self.records.iter().map(|record| record.fields.clone()).collect()
    }
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
