//! InMemoryStore - RwLock-backed record store for in-process use.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::record::{FieldMap, Record, RecordId, RESERVED_FIELDS};
use crate::schema::Schema;
use crate::transfer::{ExportDocument, ImportSummary};

use super::{RecordStore, StorageUsage};

/// Live store contents. Ascending ids make BTreeMap iteration equal to
/// insertion order.
struct Inner {
    records: BTreeMap<RecordId, Record>,
    // unique field name -> normalized value -> owning record id
    indexes: HashMap<String, HashMap<String, RecordId>>,
    next_id: RecordId,
}

impl Inner {
    fn check_unique(
        &self,
        schema: &Schema,
        fields: &FieldMap,
        exclude: Option<RecordId>,
    ) -> Result<(), StoreError> {
        for spec in schema.unique_fields() {
            if let Some(value) = fields.get(&spec.name) {
                let taken = self
                    .indexes
                    .get(&spec.name)
                    .and_then(|index| index.get(value))
                    .copied();
                if let Some(owner) = taken {
                    if Some(owner) != exclude {
                        return Err(StoreError::Conflict {
                            field: spec.name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn index_insert(&mut self, schema: &Schema, record: &Record) {
        for spec in schema.unique_fields() {
            if let Some(value) = record.fields.get(&spec.name) {
                self.indexes
                    .entry(spec.name.clone())
                    .or_default()
                    .insert(value.clone(), record.id);
            }
        }
    }

    fn index_remove(&mut self, schema: &Schema, record: &Record) {
        for spec in schema.unique_fields() {
            if let Some(value) = record.fields.get(&spec.name) {
                if let Some(index) = self.indexes.get_mut(&spec.name) {
                    index.remove(value);
                }
            }
        }
    }
}

enum State {
    Closed,
    Open(Inner),
}

fn open_ref(state: &State) -> Result<&Inner, StoreError> {
    match state {
        State::Open(inner) => Ok(inner),
        State::Closed => Err(StoreError::NotInitialized),
    }
}

fn open_mut(state: &mut State) -> Result<&mut Inner, StoreError> {
    match state {
        State::Open(inner) => Ok(inner),
        State::Closed => Err(StoreError::NotInitialized),
    }
}

/// In-memory record store.
///
/// Starts uninitialized; every operation other than [`open`](Self::open)
/// fails with `NotInitialized` until then. Clone-friendly via Arc: clones
/// share storage.
#[derive(Clone)]
pub struct InMemoryStore {
    schema: Schema,
    state: Arc<RwLock<State>>,
    quota_bytes: Option<u64>,
}

impl InMemoryStore {
    /// Create a store handle for `schema`, not yet opened.
    pub fn new(schema: Schema) -> Self {
        InMemoryStore {
            schema,
            state: Arc::new(RwLock::new(State::Closed)),
            quota_bytes: None,
        }
    }

    /// Configure a storage quota, reported by [`usage`](RecordStore::usage).
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Transition to ready. Idempotent; an already-open store keeps its
    /// records.
    pub fn open(&self) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if let State::Closed = *state {
            let mut indexes = HashMap::new();
            for spec in self.schema.unique_fields() {
                indexes.insert(spec.name.clone(), HashMap::new());
            }
            *state = State::Open(Inner {
                records: BTreeMap::new(),
                indexes,
                next_id: 1,
            });
            info!(store = self.schema.name(), "store opened");
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }
}

impl RecordStore for InMemoryStore {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn create(&self, mut fields: FieldMap) -> Result<Record, StoreError> {
        let mut state = self.write()?;
        let inner = open_mut(&mut state)?;

        for name in RESERVED_FIELDS {
            fields.remove(name);
        }
        self.schema.normalize(&mut fields);
        self.schema.validate(&fields)?;
        inner.check_unique(&self.schema, &fields, None)?;

        let id = inner.next_id;
        inner.next_id += 1;
        let now = Utc::now();
        let record = Record {
            id,
            created: now,
            updated: now,
            fields,
        };
        inner.index_insert(&self.schema, &record);
        inner.records.insert(id, record.clone());

        debug!(store = self.schema.name(), id, "record created");
        Ok(record)
    }

    fn get(&self, id: RecordId) -> Result<Record, StoreError> {
        let state = self.read()?;
        let inner = open_ref(&state)?;
        inner
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn list(&self) -> Result<Vec<Record>, StoreError> {
        let state = self.read()?;
        let inner = open_ref(&state)?;
        Ok(inner.records.values().cloned().collect())
    }

    fn update(&self, id: RecordId, patch: FieldMap) -> Result<Record, StoreError> {
        let mut state = self.write()?;
        let inner = open_mut(&mut state)?;

        let existing = inner
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })?;

        let mut merged = existing.fields.clone();
        for (name, value) in patch {
            merged.insert(name, value);
        }
        for name in RESERVED_FIELDS {
            merged.remove(name);
        }
        self.schema.normalize(&mut merged);
        self.schema.validate(&merged)?;
        inner.check_unique(&self.schema, &merged, Some(id))?;

        let now = Utc::now();
        let record = Record {
            id,
            created: existing.created,
            // updated >= created even if the clock steps backwards
            updated: now.max(existing.created),
            fields: merged,
        };
        inner.index_remove(&self.schema, &existing);
        inner.index_insert(&self.schema, &record);
        inner.records.insert(id, record.clone());

        debug!(store = self.schema.name(), id, "record updated");
        Ok(record)
    }

    fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let mut state = self.write()?;
        let inner = open_mut(&mut state)?;

        let record = inner.records.remove(&id).ok_or(StoreError::NotFound { id })?;
        inner.index_remove(&self.schema, &record);

        debug!(store = self.schema.name(), id, "record deleted");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut state = self.write()?;
        let inner = open_mut(&mut state)?;

        let removed = inner.records.len();
        inner.records.clear();
        for index in inner.indexes.values_mut() {
            index.clear();
        }

        info!(store = self.schema.name(), removed, "store cleared");
        Ok(())
    }

    fn search(&self, term: &str) -> Result<Vec<Record>, StoreError> {
        let state = self.read()?;
        let inner = open_ref(&state)?;

        let term = term.trim();
        if term.is_empty() {
            return Ok(inner.records.values().cloned().collect());
        }

        let needle = term.to_lowercase();
        Ok(inner
            .records
            .values()
            .filter(|record| record.matches(&needle))
            .cloned()
            .collect())
    }

    fn find(&self, predicate: &dyn Fn(&Record) -> bool) -> Result<Vec<Record>, StoreError> {
        let state = self.read()?;
        let inner = open_ref(&state)?;
        Ok(inner
            .records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }

    fn find_one(
        &self,
        predicate: &dyn Fn(&Record) -> bool,
    ) -> Result<Option<Record>, StoreError> {
        let state = self.read()?;
        let inner = open_ref(&state)?;
        Ok(inner
            .records
            .values()
            .find(|record| predicate(record))
            .cloned())
    }

    fn import_batch(&self, candidates: Vec<FieldMap>) -> Result<ImportSummary, StoreError> {
        let mut summary = ImportSummary::default();
        for candidate in candidates {
            match self.create(candidate) {
                Ok(_) => summary.imported += 1,
                Err(StoreError::Conflict { field }) => {
                    summary.skipped += 1;
                    debug!(%field, "import skipped duplicate candidate");
                }
                Err(StoreError::Validation(reason)) => {
                    summary.skipped += 1;
                    debug!(%reason, "import skipped invalid candidate");
                }
                Err(err) => return Err(err),
            }
        }
        info!(
            store = self.schema.name(),
            imported = summary.imported,
            skipped = summary.skipped,
            "import finished"
        );
        Ok(summary)
    }

    fn export_all(&self) -> Result<ExportDocument, StoreError> {
        let state = self.read()?;
        let inner = open_ref(&state)?;
        let records: Vec<Record> = inner.records.values().cloned().collect();
        Ok(ExportDocument::new(&self.schema, records))
    }

    fn usage(&self) -> StorageUsage {
        let state = match self.state.read() {
            Ok(state) => state,
            Err(_) => return StorageUsage::Unavailable,
        };
        let inner = match &*state {
            State::Open(inner) => inner,
            State::Closed => return StorageUsage::Unavailable,
        };
        let used_bytes = inner
            .records
            .values()
            .map(|record| {
                serde_json::to_vec(record)
                    .map(|bytes| bytes.len() as u64)
                    .unwrap_or(0)
            })
            .sum();
        StorageUsage::Estimate {
            used_bytes,
            quota_bytes: self.quota_bytes,
        }
    }
}
