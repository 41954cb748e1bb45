//! Stores - Keyed record storage with uniqueness constraints.
//!
//! A store holds one kind of record (contacts, users) as described by its
//! [`Schema`](crate::Schema). Mutations are serialized: the uniqueness
//! check and the write execute as one atomic step under a single write
//! guard, so two interleaved creates with the same constrained value can
//! never both succeed. Reads observe a consistent snapshot.
//!
//! ## Example
//!
//! ```
//! use fieldstore::{FieldMap, InMemoryStore, Normalizer, RecordStore, Schema};
//!
//! let schema = Schema::new("contacts")
//!     .required("name")
//!     .unique("mobile", Normalizer::Digits)
//!     .unique("email", Normalizer::Lowercase)
//!     .optional("address");
//!
//! let store = InMemoryStore::new(schema);
//! store.open().unwrap();
//!
//! let mut fields = FieldMap::new();
//! fields.insert("name".into(), "Ann".into());
//! fields.insert("mobile".into(), "555-1212".into());
//! fields.insert("email".into(), "A@X.com".into());
//!
//! let record = store.create(fields).unwrap();
//! assert_eq!(record.field("mobile"), Some("5551212"));
//! ```

mod in_memory;
mod store;

/// Result of the storage usage query.
///
/// Safe to ask at any time, including before the store is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageUsage {
    /// The store is not ready; no estimate can be produced.
    Unavailable,
    /// Estimated bytes used by serialized records, plus the configured quota.
    Estimate {
        used_bytes: u64,
        quota_bytes: Option<u64>,
    },
}

impl StorageUsage {
    /// Percentage of the configured quota in use, if both are known.
    pub fn percent_of_quota(&self) -> Option<f64> {
        match self {
            StorageUsage::Estimate {
                used_bytes,
                quota_bytes: Some(quota),
            } if *quota > 0 => Some(*used_bytes as f64 / *quota as f64 * 100.0),
            _ => None,
        }
    }
}

pub use in_memory::InMemoryStore;
pub use store::RecordStore;
