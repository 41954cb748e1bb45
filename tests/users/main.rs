use fieldstore::auth::{user_schema, AuthError, AuthService, Credentials, PasswordHasher};
use fieldstore::{EmittableStore, InMemoryStore, RecordStore};

/// Deterministic stand-in for a real KDF; the store only ever sees the blob.
struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, password: &str) -> String {
        format!("hashed${}", password)
    }

    fn verify(&self, password: &str, hashed: &str) -> bool {
        hashed == self.hash(password)
    }
}

fn service() -> AuthService<InMemoryStore, PrefixHasher> {
    let users = InMemoryStore::new(user_schema());
    users.open().unwrap();
    AuthService::new(users, PrefixHasher)
}

fn creds(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.into(),
        password: password.into(),
    }
}

// --- Register ---

#[test]
fn register_creates_a_user_record() {
    let service = service();
    let record = service.register(&creds("admin", "12345")).unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.field("username"), Some("admin"));
    assert_eq!(record.field("password_hash"), Some("hashed$12345"));
}

#[test]
fn second_registration_with_same_username_conflicts() {
    let service = service();
    service.register(&creds("admin", "12345")).unwrap();

    let err = service.register(&creds("admin", "different")).unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));
    assert_eq!(err.status_code(), 409);
    assert_eq!(service.users().list().unwrap().len(), 1);
}

#[test]
fn register_rejects_blank_input() {
    let service = service();

    let err = service.register(&creds("admin", "")).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = service.register(&creds("", "secret")).unwrap_err();
    assert_eq!(err.status_code(), 400);
}

// --- Login ---

#[test]
fn login_succeeds_with_the_registered_password() {
    let service = service();
    service.register(&creds("admin", "12345")).unwrap();

    let user = service.login(&creds("admin", "12345")).unwrap();
    assert_eq!(user.field("username"), Some("admin"));
}

#[test]
fn login_failures_map_to_401() {
    let service = service();
    service.register(&creds("admin", "12345")).unwrap();

    let wrong = service.login(&creds("admin", "wrong")).unwrap_err();
    assert_eq!(wrong.status_code(), 401);

    let unknown = service.login(&creds("nobody", "12345")).unwrap_err();
    assert_eq!(unknown.status_code(), 401);
}

// --- Store interplay ---

#[test]
fn users_store_supports_plain_record_operations() {
    let service = service();
    service.register(&creds("admin", "12345")).unwrap();
    service.register(&creds("guest", "guest")).unwrap();

    let found = service.users().search("adm").unwrap();
    assert_eq!(found.len(), 1);

    let all = service.users().list().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn registration_is_visible_through_an_emitting_wrapper() {
    let users = InMemoryStore::new(user_schema());
    users.open().unwrap();

    // The service and the emitter wrapper share the same storage.
    let service = AuthService::new(users.clone(), PrefixHasher);
    let emitting = users.with_emitter();

    service.register(&creds("admin", "12345")).unwrap();
    assert_eq!(emitting.store().list().unwrap().len(), 1);
}
