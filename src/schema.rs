//! Schema - Per-store configuration: field requirements, uniqueness
//! constraints, and normalization.
//!
//! A `Schema` is what distinguishes a contact store from a user store;
//! the store logic itself is generic.
//!
//! ## Example
//!
//! ```
//! use fieldstore::{Normalizer, Schema};
//!
//! let contacts = Schema::new("contacts")
//!     .required("name")
//!     .unique("mobile", Normalizer::Digits)
//!     .unique("email", Normalizer::Lowercase)
//!     .optional("address");
//! assert_eq!(contacts.name(), "contacts");
//! ```

use crate::error::StoreError;
use crate::record::FieldMap;

/// Deterministic transform applied to a uniqueness-constrained field
/// before the uniqueness check and before storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Store the value as given.
    None,
    /// Strip every non-digit character (phone-like fields).
    Digits,
    /// Lowercase the value (email-like fields).
    Lowercase,
}

impl Normalizer {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Normalizer::None => raw.to_string(),
            Normalizer::Digits => raw.chars().filter(char::is_ascii_digit).collect(),
            Normalizer::Lowercase => raw.to_lowercase(),
        }
    }
}

/// Declaration of one schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    pub unique: bool,
    pub normalizer: Normalizer,
}

/// Store configuration: name, schema version, and field declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    version: u32,
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Schema {
            name: name.into(),
            version: 1,
            fields: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Declare a required field.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            required: true,
            unique: false,
            normalizer: Normalizer::None,
        });
        self
    }

    /// Declare an optional field.
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            required: false,
            unique: false,
            normalizer: Normalizer::None,
        });
        self
    }

    /// Declare a uniqueness-constrained field. Unique fields are required.
    pub fn unique(mut self, name: impl Into<String>, normalizer: Normalizer) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            required: true,
            unique: true,
            normalizer,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn unique_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.unique)
    }

    /// Apply normalizers in place to every constrained field present.
    pub fn normalize(&self, fields: &mut FieldMap) {
        for spec in self.unique_fields() {
            if let Some(value) = fields.get(&spec.name) {
                let normalized = spec.normalizer.apply(value);
                fields.insert(spec.name.clone(), normalized);
            }
        }
    }

    /// Check that every required field is present and non-empty.
    pub fn validate(&self, fields: &FieldMap) -> Result<(), StoreError> {
        for spec in self.fields.iter().filter(|spec| spec.required) {
            let present = fields
                .get(&spec.name)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false);
            if !present {
                return Err(StoreError::Validation(format!(
                    "required field missing or empty: {}",
                    spec.name
                )));
            }
        }
        Ok(())
    }
}
