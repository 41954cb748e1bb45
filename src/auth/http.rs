//! HTTP transport for auth — maps register/login requests to the service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /register` — body = JSON [`Credentials`]. 201 on success,
//!   409 duplicate username, 400 bad input.
//! - `POST /login` — body = JSON [`Credentials`]. 200 on success,
//!   401 unknown user or wrong password.
//! - `GET /health` — health check returning `{ "ok": true, "store": … }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use fieldstore::auth;
//!
//! let service = Arc::new(auth::AuthService::new(users, hasher));
//!
//! // Get the router to compose with other axum routes
//! let app = auth::router(service.clone());
//!
//! // Or serve directly
//! auth::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

use crate::record::Record;
use crate::store::RecordStore;

use super::error::AuthError;
use super::service::{AuthService, PasswordHasher};
use super::Credentials;

/// Build an axum `Router` over the given auth service.
pub fn router<S, H>(service: Arc<AuthService<S, H>>) -> Router
where
    S: RecordStore + 'static,
    H: PasswordHasher + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(service)
}

/// Serve the auth service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S, H>(
    service: Arc<AuthService<S, H>>,
    addr: &str,
) -> Result<(), std::io::Error>
where
    S: RecordStore + 'static,
    H: PasswordHasher + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "auth transport listening");
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "store": … }`.
async fn health_handler<S, H>(State(service): State<Arc<AuthService<S, H>>>) -> impl IntoResponse
where
    S: RecordStore + 'static,
    H: PasswordHasher + 'static,
{
    Json(json!({ "ok": true, "store": service.users().schema().name() }))
}

/// `POST /register` — create a user from JSON credentials.
async fn register_handler<S, H>(
    State(service): State<Arc<AuthService<S, H>>>,
    Json(credentials): Json<Credentials>,
) -> impl IntoResponse
where
    S: RecordStore + 'static,
    H: PasswordHasher + 'static,
{
    match service.register(&credentials) {
        Ok(record) => (StatusCode::CREATED, Json(user_body(&record))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `POST /login` — check JSON credentials against the stored hash.
async fn login_handler<S, H>(
    State(service): State<Arc<AuthService<S, H>>>,
    Json(credentials): Json<Credentials>,
) -> impl IntoResponse
where
    S: RecordStore + 'static,
    H: PasswordHasher + 'static,
{
    match service.login(&credentials) {
        Ok(record) => (StatusCode::OK, Json(user_body(&record))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Response body for a user record. The password hash never leaves the
/// service boundary.
fn user_body(record: &Record) -> serde_json::Value {
    json!({ "id": record.id, "username": record.field("username") })
}

fn error_response(error: &AuthError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = json!({ "error": error.to_string() });
    (status, Json(body)).into_response()
}
