use super::*;
use crate::test_fixtures::{collection, connected_store, context, enumerators, sources};
use msm_db::{DataStore, InMemoryStore, StoreCall};
use serde_json::json;

fn users_two_versions() -> CollectionDefinition {
    collection(json!({
        "name": "users",
        "versions": [
            {"version": "1.0.0.0"},
            {"version": "2.0.0.0"}
        ]
    }))
}

fn set_versions(store: &InMemoryStore) -> Vec<String> {
    store
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            StoreCall::SetVersion { version, .. } => Some(version),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_fresh_collection_applies_all_versions() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let migrator = CollectionMigrator::new(users_two_versions(), &ctx).unwrap();
    let store = connected_store().await;

    let applied = migrator.run(&store, &ctx).await.unwrap();

    assert_eq!(
        applied.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["1.0.0.0", "2.0.0.0"]
    );
    assert_eq!(set_versions(&store), vec!["1.0.0.0", "2.0.0.0"]);
    assert_eq!(store.version("users").as_deref(), Some("2.0.0.0"));
}

#[tokio::test]
async fn test_resumes_from_ledger() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let migrator = CollectionMigrator::new(users_two_versions(), &ctx).unwrap();
    let store = InMemoryStore::new().with_version("users", "1.0.0.0");
    store.connect().await.unwrap();

    let applied = migrator.run(&store, &ctx).await.unwrap();

    assert_eq!(applied, vec![VersionNumber::new(2, 0, 0, 0)]);
    assert_eq!(set_versions(&store), vec!["2.0.0.0"]);
    assert_eq!(store.version("users").as_deref(), Some("2.0.0.0"));
}

#[tokio::test]
async fn test_up_to_date_collection_is_untouched() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let migrator = CollectionMigrator::new(users_two_versions(), &ctx).unwrap();
    let store = InMemoryStore::new().with_version("users", "2.0.0.0");
    store.connect().await.unwrap();

    let applied = migrator.run(&store, &ctx).await.unwrap();

    assert!(applied.is_empty());
    assert_eq!(store.operations_on("users"), vec!["get_version"]);
}

#[tokio::test]
async fn test_ledger_reread_after_each_apply() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let migrator = CollectionMigrator::new(users_two_versions(), &ctx).unwrap();
    let store = connected_store().await;

    migrator.run(&store, &ctx).await.unwrap();

    let operations = store.operations_on("users");
    let reads = operations.iter().filter(|op| **op == "get_version").count();
    assert_eq!(reads, 3);
    assert_eq!(operations.first(), Some(&"get_version"));
    assert_eq!(operations.last(), Some(&"get_version"));
}

#[tokio::test]
async fn test_declaration_order_not_sorted() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let definition = collection(json!({
        "name": "users",
        "versions": [{"version": "2.0.0.0"}, {"version": "1.0.0.0"}]
    }));
    let migrator = CollectionMigrator::new(definition, &ctx).unwrap();
    let store = connected_store().await;

    let applied = migrator.run(&store, &ctx).await.unwrap();

    // 1.0.0.0 is evaluated after 2.0.0.0 is recorded, so it is skipped.
    assert_eq!(applied, vec![VersionNumber::new(2, 0, 0, 0)]);
}

#[tokio::test]
async fn test_failure_stops_at_failed_version() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let definition = collection(json!({
        "name": "users",
        "versions": [
            {"version": "1.0.0.0"},
            {"version": "2.0.0.0", "dropIndexes": ["missingIndex"]}
        ]
    }));
    let migrator = CollectionMigrator::new(definition, &ctx).unwrap();
    let store = connected_store().await;

    let err = migrator.run(&store, &ctx).await.unwrap_err();

    match err {
        MigrateError::VersionFailed {
            collection,
            version,
            ..
        } => {
            assert_eq!(collection, "users");
            assert_eq!(version, "2.0.0.0");
        }
        other => panic!("expected VersionFailed, got {other}"),
    }
    assert_eq!(store.version("users").as_deref(), Some("1.0.0.0"));
}

#[tokio::test]
async fn test_unreadable_ledger_version() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let migrator = CollectionMigrator::new(users_two_versions(), &ctx).unwrap();
    let store = InMemoryStore::new().with_version("users", "1.0");
    store.connect().await.unwrap();

    let err = migrator.run(&store, &ctx).await.unwrap_err();
    assert!(matches!(err, MigrateError::InvalidLedgerVersion { .. }));
}

#[test]
fn test_build_fails_fast_on_any_bad_version() {
    let sources = sources();
    let enums = enumerators();
    let ctx = context(&sources, &enums, false);
    let definition = collection(json!({
        "name": "users",
        "versions": [{"version": "1.0.0.0"}, {"version": "3.0.0.0"}]
    }));

    let err = CollectionMigrator::new(definition, &ctx).unwrap_err();
    assert!(matches!(
        err,
        MigrateError::InvalidDefinition { ref version, .. } if version == "3.0.0.0"
    ));
}
