use fieldstore::{FieldMap, InMemoryStore, Normalizer, RecordStore, Schema, StoreError};

fn contacts_schema() -> Schema {
    Schema::new("contacts")
        .required("name")
        .unique("mobile", Normalizer::Digits)
        .unique("email", Normalizer::Lowercase)
        .optional("address")
}

fn open_store() -> InMemoryStore {
    let store = InMemoryStore::new(contacts_schema());
    store.open().unwrap();
    store
}

fn contact(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// --- Create / Read ---

#[test]
fn created_contact_is_readable_and_equal() {
    let store = open_store();
    let created = store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
            ("address", "12 Main St"),
        ]))
        .unwrap();

    assert_eq!(created.id, 1);
    let fetched = store.get(created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn formatted_mobile_collides_with_plain_digits() {
    let store = open_store();
    let ann = store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
        ]))
        .unwrap();
    assert_eq!(ann.id, 1);

    // Same digits, different formatting: the normalized values match.
    let err = store
        .create(contact(&[
            ("name", "Bob"),
            ("mobile", "5551212"),
            ("email", "b@x.com"),
        ]))
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::Conflict {
            field: "mobile".into()
        }
    );
    assert_eq!(store.list().unwrap().len(), 1);
}

// --- Update ---

#[test]
fn partial_update_retains_unpatched_fields() {
    let store = open_store();
    let created = store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
        ]))
        .unwrap();

    let updated = store
        .update(created.id, contact(&[("name", "Ann Example")]))
        .unwrap();
    assert_eq!(updated.field("name"), Some("Ann Example"));
    assert_eq!(updated.field("mobile"), Some("5551212"));
    assert_eq!(updated.field("email"), Some("a@x.com"));
    assert_eq!(updated.created, created.created);
    assert!(updated.updated >= created.updated);
}

#[test]
fn update_conflict_is_rejected_without_partial_write() {
    let store = open_store();
    store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
        ]))
        .unwrap();
    let bob = store
        .create(contact(&[
            ("name", "Bob"),
            ("mobile", "555-2323"),
            ("email", "b@x.com"),
        ]))
        .unwrap();

    let err = store
        .update(
            bob.id,
            contact(&[("name", "Robert"), ("mobile", "555 1212")]),
        )
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::Conflict {
            field: "mobile".into()
        }
    );

    // The whole patch is discarded, including the non-conflicting part.
    let unchanged = store.get(bob.id).unwrap();
    assert_eq!(unchanged.field("name"), Some("Bob"));
    assert_eq!(unchanged.field("mobile"), Some("5552323"));
}

// --- Delete / Clear ---

#[test]
fn deleted_contact_stays_gone() {
    let store = open_store();
    let created = store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
        ]))
        .unwrap();

    store.delete(created.id).unwrap();
    assert_eq!(
        store.get(created.id).unwrap_err(),
        StoreError::NotFound { id: created.id }
    );
    assert_eq!(
        store.delete(created.id).unwrap_err(),
        StoreError::NotFound { id: created.id }
    );
}

#[test]
fn clear_empties_the_store_but_ids_keep_increasing() {
    let store = open_store();
    let before = store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
        ]))
        .unwrap();
    store.clear().unwrap();
    assert!(store.list().unwrap().is_empty());

    let after = store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
        ]))
        .unwrap();
    assert!(after.id > before.id);
}

// --- Search ---

#[test]
fn search_covers_required_and_optional_fields() {
    let store = open_store();
    store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
            ("address", "12 Main St"),
        ]))
        .unwrap();
    store
        .create(contact(&[
            ("name", "Bob"),
            ("mobile", "555-2323"),
            ("email", "b@x.com"),
        ]))
        .unwrap();

    let by_address = store.search("MAIN").unwrap();
    assert_eq!(by_address.len(), 1);
    assert_eq!(by_address[0].field("name"), Some("Ann"));

    let by_digits = store.search("2323").unwrap();
    assert_eq!(by_digits.len(), 1);
    assert_eq!(by_digits[0].field("name"), Some("Bob"));
}

#[test]
fn blank_search_is_list_in_the_same_order() {
    let store = open_store();
    for (name, mobile, email) in [
        ("Cyd", "555-3434", "c@x.com"),
        ("Ann", "555-1212", "a@x.com"),
        ("Bob", "555-2323", "b@x.com"),
    ] {
        store
            .create(contact(&[
                ("name", name),
                ("mobile", mobile),
                ("email", email),
            ]))
            .unwrap();
    }

    let listed = store.list().unwrap();
    assert_eq!(store.search("").unwrap(), listed);
    assert_eq!(store.search(" \t ").unwrap(), listed);

    // Storage order is insertion order, not alphabetical.
    let names: Vec<_> = listed.iter().map(|r| r.field("name").unwrap()).collect();
    assert_eq!(names, vec!["Cyd", "Ann", "Bob"]);
}

// --- Lifecycle ---

#[test]
fn store_recovers_after_every_error_kind() {
    let store = open_store();
    store
        .create(contact(&[
            ("name", "Ann"),
            ("mobile", "555-1212"),
            ("email", "a@x.com"),
        ]))
        .unwrap();

    // Validation, conflict, not-found: all leave the store usable.
    assert!(store.create(contact(&[("name", "NoPhone")])).is_err());
    assert!(store
        .create(contact(&[
            ("name", "Dup"),
            ("mobile", "5551212"),
            ("email", "d@x.com"),
        ]))
        .is_err());
    assert!(store.get(999).is_err());

    let ok = store
        .create(contact(&[
            ("name", "Bob"),
            ("mobile", "555-2323"),
            ("email", "b@x.com"),
        ]))
        .unwrap();
    assert_eq!(store.list().unwrap().len(), 2);
    assert_eq!(ok.field("name"), Some("Bob"));
}

#[test]
fn unopened_handle_rejects_reads_but_reports_usage() {
    let store = InMemoryStore::new(contacts_schema());
    assert_eq!(store.list().unwrap_err(), StoreError::NotInitialized);
    assert_eq!(store.usage(), fieldstore::StorageUsage::Unavailable);

    store.open().unwrap();
    assert!(store.list().unwrap().is_empty());
}
