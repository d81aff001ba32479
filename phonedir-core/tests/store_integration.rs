//! Contact store integration tests.
//!
//! These require a running PostgreSQL instance, configured through the
//! usual DATABASE_* variables:
//!
//!   DATABASE_NAME=phone_directory cargo test -p phonedir-core -- --ignored
//!
//! Each test owns a distinct phone prefix so tests can run concurrently
//! against one database; leftovers from earlier runs are cleared up front.

use std::fs::File;
use std::io::BufReader;

use sqlx::PgPool;

use phonedir_core::{
    connect_pool, ensure_schema, import_csv, render_csv, ContactStore, DbConfig, NewContact,
    StoreError,
};

async fn test_pool() -> PgPool {
    let config = DbConfig::from_env().expect("config should parse");
    let pool = connect_pool(&config).await.expect("pool creation failed");
    ensure_schema(&pool).await.expect("schema bootstrap failed");
    pool
}

async fn clear_prefix(pool: &PgPool, prefix: &str) {
    sqlx::query("DELETE FROM contacts WHERE phone LIKE $1")
        .bind(format!("{prefix}%"))
        .execute(pool)
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore = "requires database"]
async fn add_then_search_finds_exactly_one() {
    let pool = test_pool().await;
    clear_prefix(&pool, "555-1").await;
    let store = ContactStore::new(&pool);

    let id = store
        .add(&NewContact::new("Alice", "555-1000", "1 Main St"))
        .await
        .expect("add failed");
    assert!(id > 0);

    let found = store.search("555-1000").await.expect("search failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
    assert_eq!(found[0].name, "Alice");
    assert_eq!(found[0].phone, "555-1000");
    assert_eq!(found[0].address, "1 Main St");

    clear_prefix(&pool, "555-1").await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_phone_is_rejected_and_row_unchanged() {
    let pool = test_pool().await;
    clear_prefix(&pool, "555-2").await;
    let store = ContactStore::new(&pool);

    store
        .add(&NewContact::new("Alice", "555-2000", "1 Main St"))
        .await
        .expect("first add failed");

    let err = store
        .add(&NewContact::new("Bob", "555-2000", "2 Oak St"))
        .await
        .expect_err("second add should collide");
    assert!(matches!(err, StoreError::DuplicatePhone { ref phone } if phone == "555-2000"));

    let found = store.search("555-2000").await.expect("search failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alice");
    assert_eq!(found[0].address, "1 Main St");

    clear_prefix(&pool, "555-2").await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_id_is_not_found() {
    let pool = test_pool().await;
    let store = ContactStore::new(&pool);

    let err = store
        .update(i64::MAX, &NewContact::new("Nobody", "555-3000", ""))
        .await
        .expect_err("update should miss");
    assert!(matches!(err, StoreError::NotFound { id } if id == i64::MAX));

    // The phone from the failed update must not have materialized.
    let found = store.search("555-3000").await.expect("search failed");
    assert!(found.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_missing_id_is_not_found() {
    let pool = test_pool().await;
    let store = ContactStore::new(&pool);

    let err = store.delete(i64::MAX).await.expect_err("delete should miss");
    assert!(matches!(err, StoreError::NotFound { id } if id == i64::MAX));
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_replaces_all_mutable_fields() {
    let pool = test_pool().await;
    clear_prefix(&pool, "555-4").await;
    let store = ContactStore::new(&pool);

    let id = store
        .add(&NewContact::new("Carol", "555-4000", "old address"))
        .await
        .expect("add failed");

    store
        .update(id, &NewContact::new("Caroline", "555-4001", "new address"))
        .await
        .expect("update failed");

    let found = store.search("555-4001").await.expect("search failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Caroline");
    assert_eq!(found[0].address, "new address");
    assert_eq!(found[0].id, id);

    clear_prefix(&pool, "555-4").await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_is_case_insensitive_substring() {
    let pool = test_pool().await;
    clear_prefix(&pool, "555-5").await;
    let store = ContactStore::new(&pool);

    store
        .add(&NewContact::new("Alice Johnson", "555-5000", "9 Elm St"))
        .await
        .expect("add failed");

    for term in ["ali", "ALICE", "johns", "elm"] {
        let found = store.search(term).await.expect("search failed");
        assert!(
            found.iter().any(|c| c.phone == "555-5000"),
            "term '{term}' should match"
        );
    }

    let found = store.search("no-such-contact").await.expect("search failed");
    assert!(found.iter().all(|c| c.phone != "555-5000"));

    clear_prefix(&pool, "555-5").await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn export_import_round_trip() {
    let pool = test_pool().await;
    clear_prefix(&pool, "555-6").await;
    let store = ContactStore::new(&pool);

    for (name, phone, address) in [
        ("Dave", "555-6000", "1 Pine St, Apt 2"),
        ("Erin", "555-6001", ""),
        ("Frank \"Frankie\" Oz", "555-6002", "3 Birch Rd"),
    ] {
        store
            .add(&NewContact::new(name, phone, address))
            .await
            .expect("seed add failed");
    }

    let exported = store.search("555-6").await.expect("search failed");
    assert_eq!(exported.len(), 3);
    let bytes = render_csv(&exported).expect("render failed");

    // Through a real file, the way the menu drives the bridge.
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("contacts_export.csv");
    std::fs::write(&path, &bytes).expect("write failed");

    // Re-import into an empty table (for this prefix).
    clear_prefix(&pool, "555-6").await;
    let file = File::open(&path).expect("open failed");
    let report = import_csv(&store, BufReader::new(file))
        .await
        .expect("import failed");

    assert_eq!(report.imported, 3);
    assert_eq!(report.skipped, 0);

    let restored = store.search("555-6").await.expect("search failed");
    assert_eq!(restored.len(), 3);
    assert!(restored
        .iter()
        .any(|c| c.name == "Frank \"Frankie\" Oz" && c.address == "3 Birch Rd"));

    clear_prefix(&pool, "555-6").await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn import_of_all_duplicates_reports_only_skips() {
    let pool = test_pool().await;
    clear_prefix(&pool, "555-7").await;
    let store = ContactStore::new(&pool);

    store
        .add(&NewContact::new("Grace", "555-7000", ""))
        .await
        .expect("seed add failed");

    let csv = "Name,Phone,Address\n\
               Grace,555-7000,1 Main St\n\
               Heidi,555-7000,2 Oak St\n";
    let report = import_csv(&store, csv.as_bytes())
        .await
        .expect("import itself should succeed");

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 2);

    clear_prefix(&pool, "555-7").await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn import_drops_incomplete_rows_from_both_tallies() {
    let pool = test_pool().await;
    clear_prefix(&pool, "555-8").await;
    let store = ContactStore::new(&pool);

    // Lowercase headers, one row lacking a phone, one lacking a name.
    let csv = "name,phone,address\n\
               Ivan,555-8000,\n\
               NoPhone,,somewhere\n\
               ,555-8001,elsewhere\n";
    let report = import_csv(&store, csv.as_bytes())
        .await
        .expect("import failed");

    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 0);

    let found = store.search("555-8").await.expect("search failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ivan");

    clear_prefix(&pool, "555-8").await;
}
