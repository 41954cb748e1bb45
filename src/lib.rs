mod error;
mod record;
mod schema;
mod store;
mod transfer;

pub mod auth;

pub use error::StoreError;
pub use record::{FieldMap, Record, RecordId};
pub use schema::{FieldSpec, Normalizer, Schema};
pub use store::{InMemoryStore, RecordStore, StorageUsage};
pub use transfer::{ExportDocument, ImportSummary};

#[cfg(feature = "emitter")]
mod emitter;
#[cfg(feature = "emitter")]
pub use emitter::{EmittableStore, StoreEmitter};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
