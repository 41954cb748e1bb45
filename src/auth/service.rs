use tracing::{debug, warn};

use crate::error::StoreError;
use crate::record::{FieldMap, Record};
use crate::store::RecordStore;

use super::error::AuthError;
use super::Credentials;

/// Password hashing collaborator. The store persists whatever `hash`
/// returns as an opaque blob; only `verify` ever looks inside it.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> String;
    fn verify(&self, password: &str, hashed: &str) -> bool;
}

/// Register/login operations over a user-flavored record store.
pub struct AuthService<S, H> {
    users: S,
    hasher: H,
}

impl<S: RecordStore, H: PasswordHasher> AuthService<S, H> {
    /// Build a service over a store shaped like [`user_schema`](super::user_schema).
    pub fn new(users: S, hasher: H) -> Self {
        AuthService { users, hasher }
    }

    /// Access the underlying user store.
    pub fn users(&self) -> &S {
        &self.users
    }

    /// Register a new user. The password is hashed before it reaches the
    /// store; a duplicate username maps to [`AuthError::UsernameTaken`].
    pub fn register(&self, credentials: &Credentials) -> Result<Record, AuthError> {
        if credentials.password.trim().is_empty() {
            return Err(AuthError::Validation("password must not be empty".into()));
        }

        let mut fields = FieldMap::new();
        fields.insert("username".into(), credentials.username.clone());
        fields.insert(
            "password_hash".into(),
            self.hasher.hash(&credentials.password),
        );

        match self.users.create(fields) {
            Ok(record) => {
                debug!(username = %credentials.username, "user registered");
                Ok(record)
            }
            Err(StoreError::Conflict { .. }) => Err(AuthError::UsernameTaken),
            Err(StoreError::Validation(msg)) => Err(AuthError::Validation(msg)),
            Err(err) => Err(AuthError::Store(err)),
        }
    }

    /// Look up the user and compare the password against the stored hash.
    /// Unknown username and wrong password are indistinguishable to the
    /// caller.
    pub fn login(&self, credentials: &Credentials) -> Result<Record, AuthError> {
        let username = credentials.username.as_str();
        let user = self
            .users
            .find_one(&|record| record.field("username") == Some(username))?;

        let user = match user {
            Some(user) => user,
            None => {
                warn!(%username, "login failed: unknown user");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let hashed = user
            .field("password_hash")
            .ok_or(AuthError::InvalidCredentials)?;
        if !self.hasher.verify(&credentials.password, hashed) {
            warn!(%username, "login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        debug!(%username, "login succeeded");
        Ok(user)
    }
}
