//! Error types for authentication operations.

use std::error::Error;
use std::fmt;

use crate::error::StoreError;

/// Error type for register/login operations.
#[derive(Debug)]
pub enum AuthError {
    /// The username is already registered.
    UsernameTaken,
    /// Unknown username or wrong password. Deliberately undistinguished.
    InvalidCredentials,
    /// Missing or empty username/password.
    Validation(String),
    /// Underlying store failure.
    Store(StoreError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UsernameTaken => write!(f, "username already taken"),
            AuthError::InvalidCredentials => write!(f, "invalid credentials"),
            AuthError::Validation(msg) => write!(f, "validation error: {}", msg),
            AuthError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AuthError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(err)
    }
}

impl AuthError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::UsernameTaken => 409,
            AuthError::InvalidCredentials => 401,
            AuthError::Validation(_) => 400,
            AuthError::Store(_) => 500,
        }
    }
}
