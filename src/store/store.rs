//! RecordStore - Abstract CRUD storage for schema-described records.

use crate::error::StoreError;
use crate::record::{FieldMap, Record, RecordId};
use crate::schema::Schema;
use crate::transfer::{ExportDocument, ImportSummary};

use super::StorageUsage;

/// Abstract CRUD storage for one record kind.
///
/// Collaborators (auth service, emitter wrapper, presentation layers) are
/// generic over this trait rather than a concrete backend. Every read
/// returns independent copies; no caller ever holds a reference into the
/// store's own records.
pub trait RecordStore: Send + Sync {
    /// The schema this store enforces.
    fn schema(&self) -> &Schema;

    /// Create a record. Normalizes constrained fields, validates required
    /// fields, enforces uniqueness, assigns a fresh id, and sets
    /// `created = updated = now`. Returns the committed record.
    fn create(&self, fields: FieldMap) -> Result<Record, StoreError>;

    /// Get a record by id. No side effects.
    fn get(&self, id: RecordId) -> Result<Record, StoreError>;

    /// Snapshot of all live records in storage (insertion) order.
    /// Callers needing another order sort the snapshot themselves.
    fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Merge `patch` over the existing record. Fields absent from the patch
    /// are retained; constrained fields present in the patch are
    /// re-normalized and re-checked against all *other* records. Refreshes
    /// `updated`; `id` and `created` never change. A constraint violation
    /// leaves the stored record unchanged.
    fn update(&self, id: RecordId, patch: FieldMap) -> Result<Record, StoreError>;

    /// Remove a record. Repeated deletes of the same id keep failing with
    /// `NotFound`.
    fn delete(&self, id: RecordId) -> Result<(), StoreError>;

    /// Remove all records. Cannot fail on a ready store. Does not reset the
    /// id counter.
    fn clear(&self) -> Result<(), StoreError>;

    /// Case-insensitive substring match of `term` against every field value
    /// of every record. An empty or whitespace-only term is equivalent to
    /// `list()`. Snapshot in storage order; does not mutate the store.
    fn search(&self, term: &str) -> Result<Vec<Record>, StoreError>;

    /// Records matching a predicate, in storage order.
    fn find(&self, predicate: &dyn Fn(&Record) -> bool) -> Result<Vec<Record>, StoreError>;

    /// First record matching a predicate.
    fn find_one(
        &self,
        predicate: &dyn Fn(&Record) -> bool,
    ) -> Result<Option<Record>, StoreError>;

    /// Create each candidate in order. Per-candidate `Conflict` and
    /// `Validation` failures are counted as skipped and processing
    /// continues; any other error aborts the batch and propagates.
    fn import_batch(&self, candidates: Vec<FieldMap>) -> Result<ImportSummary, StoreError>;

    /// Snapshot of all records plus metadata (schema version, store name,
    /// export timestamp, record count). Pure read.
    fn export_all(&self) -> Result<ExportDocument, StoreError>;

    /// Storage usage estimate. Never fails; returns
    /// [`StorageUsage::Unavailable`] before the store is opened.
    fn usage(&self) -> StorageUsage;
}
