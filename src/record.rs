use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on creation. Never reused within a
/// store's lifetime.
pub type RecordId = u64;

/// Field name to textual value. BTreeMap keeps serialized output stable.
pub type FieldMap = BTreeMap<String, String>;

/// Field names owned by the store itself, never caller data. Stripped from
/// incoming field maps so a flat-serialized record has a single source for
/// each.
pub(crate) const RESERVED_FIELDS: [&str; 3] = ["id", "created", "updated"];

/// One stored entity instance (a contact, a user).
///
/// Records serialize flat: `{ "id": …, "created": …, "updated": …, <fields…> }`,
/// so an exported record reads the same as the entity it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Record {
    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Case-insensitive substring match against every field value.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.fields
            .values()
            .any(|value| value.to_lowercase().contains(needle))
    }
}
