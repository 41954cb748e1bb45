use event_emitter_rs::EventEmitter;
use serde_json::json;

use crate::error::StoreError;
use crate::record::{FieldMap, Record, RecordId};
use crate::store::RecordStore;
use crate::transfer::ImportSummary;

/// Extension wrapper that adds event emitter capabilities to a store.
///
/// Mutations forward to the wrapped store and, on success, emit an event a
/// presentation layer can listen to in order to refresh itself:
/// `RecordCreated`, `RecordUpdated`, `RecordDeleted`, `StoreCleared`,
/// `BatchImported`. Payloads are JSON strings. Nothing is emitted for a
/// failed operation.
///
/// # Example
///
/// ```ignore
/// use fieldstore::EmittableStore;
///
/// let mut store = InMemoryStore::new(schema).with_emitter();
///
/// store.on("RecordCreated", |data| {
///     println!("created: {}", data);
/// });
///
/// store.create(fields)?;
/// ```
pub struct StoreEmitter<S> {
    store: S,
    event_emitter: EventEmitter,
}

impl<S: RecordStore> StoreEmitter<S> {
    /// Wrap a store with emitter capabilities.
    pub fn new(store: S) -> Self {
        Self {
            store,
            event_emitter: EventEmitter::new(),
        }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap and return the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a listener for an event type.
    pub fn on<F>(&mut self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.event_emitter.on(event, listener);
    }

    fn emit(&mut self, event: &str, data: String) {
        self.event_emitter.emit(event, data);
    }

    /// Create a record and emit `RecordCreated` with the record as payload.
    pub fn create(&mut self, fields: FieldMap) -> Result<Record, StoreError> {
        let record = self.store.create(fields)?;
        let payload = serde_json::to_string(&record)?;
        self.emit("RecordCreated", payload);
        Ok(record)
    }

    /// Update a record and emit `RecordUpdated` with the record as payload.
    pub fn update(&mut self, id: RecordId, patch: FieldMap) -> Result<Record, StoreError> {
        let record = self.store.update(id, patch)?;
        let payload = serde_json::to_string(&record)?;
        self.emit("RecordUpdated", payload);
        Ok(record)
    }

    /// Delete a record and emit `RecordDeleted` with `{"id": …}`.
    pub fn delete(&mut self, id: RecordId) -> Result<(), StoreError> {
        self.store.delete(id)?;
        self.emit("RecordDeleted", json!({ "id": id }).to_string());
        Ok(())
    }

    /// Clear the store and emit `StoreCleared`.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.emit("StoreCleared", String::new());
        Ok(())
    }

    /// Import a batch and emit `BatchImported` with the summary as payload.
    pub fn import_batch(
        &mut self,
        candidates: Vec<FieldMap>,
    ) -> Result<ImportSummary, StoreError> {
        let summary = self.store.import_batch(candidates)?;
        let payload = serde_json::to_string(&summary)?;
        self.emit("BatchImported", payload);
        Ok(summary)
    }
}

/// Trait for stores that can be extended with emitter capabilities.
pub trait EmittableStore: RecordStore + Sized {
    /// Wrap with emitter capabilities.
    fn with_emitter(self) -> StoreEmitter<Self> {
        StoreEmitter::new(self)
    }
}

impl<S: RecordStore> EmittableStore for S {}
