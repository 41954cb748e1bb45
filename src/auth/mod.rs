//! auth — Username/password authentication over a user-flavored store.
//!
//! `AuthService` pairs a [`RecordStore`](crate::RecordStore) holding user
//! records with a [`PasswordHasher`] collaborator. The store persists the
//! hasher's output as an opaque blob and never inspects it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use fieldstore::auth::{self, AuthService, Credentials};
//! use fieldstore::InMemoryStore;
//!
//! let users = InMemoryStore::new(auth::user_schema());
//! users.open()?;
//! let service = AuthService::new(users, MyHasher);
//!
//! service.register(&Credentials {
//!     username: "admin".into(),
//!     password: "12345".into(),
//! })?;
//!
//! // HTTP transport (requires "http" feature)
//! // auth::serve(Arc::new(service), "0.0.0.0:3000").await?;
//! ```

mod error;
mod service;

use serde::{Deserialize, Serialize};

use crate::schema::{Normalizer, Schema};

pub use error::AuthError;
pub use service::{AuthService, PasswordHasher};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// A register/login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Schema for the users store: unique username, opaque password hash,
/// optional email. Usernames are case-sensitive.
pub fn user_schema() -> Schema {
    Schema::new("users")
        .unique("username", Normalizer::None)
        .required("password_hash")
        .optional("email")
}
