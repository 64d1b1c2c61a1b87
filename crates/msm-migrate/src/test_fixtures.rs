//! Shared fixtures for migration tests.

use crate::context::MigrationContext;
use msm_core::{CollectionDefinition, EnumeratorCatalog, InMemorySources};
use msm_db::InMemoryStore;
use serde_json::{json, Value};

pub(crate) fn enumerators() -> EnumeratorCatalog {
    EnumeratorCatalog::from_json_str(
        r#"[
            {"version": 0, "enumerators": {"status": {"active": "Active", "archived": "Archived"}}},
            {"version": 1, "enumerators": {"status": {"active": "Active", "archived": "Archived",
                                                      "deleted": "Deleted"}}}
        ]"#,
    )
    .unwrap()
}

fn users_schema() -> Value {
    json!({
        "bsonType": "object",
        "properties": {
            "_id": {"bsonType": "objectId"},
            "userName": {"msmType": "msmWord"},
            "status": {"msmEnums": "status"}
        }
    })
}

/// Sources for a `users` collection at 1.0.0 and 2.0.0, with test data.
pub(crate) fn sources() -> InMemorySources {
    InMemorySources::new()
        .with_type("msmWord", json!({"bsonType": "string", "pattern": "^[^\\s]{0,32}$"}))
        .with_schema("users", "1.0.0", users_schema())
        .with_schema("users", "2.0.0", users_schema())
        .with_test_data(
            "users.1.0.0.1",
            vec![
                json!({"_id": {"$oid": "A00000000000000000000001"}, "userName": "Jim"}),
                json!({"_id": {"$oid": "A00000000000000000000002"}, "userName": "Sally"}),
            ],
        )
}

pub(crate) fn context<'a>(
    sources: &'a InMemorySources,
    enumerators: &'a EnumeratorCatalog,
    load_test_data: bool,
) -> MigrationContext<'a> {
    MigrationContext {
        schemas: sources,
        enumerators,
        artifacts: sources,
        load_test_data,
    }
}

pub(crate) fn collection(value: Value) -> CollectionDefinition {
    serde_json::from_value(value).unwrap()
}

pub(crate) async fn connected_store() -> InMemoryStore {
    use msm_db::DataStore;

    let store = InMemoryStore::new();
    store.connect().await.unwrap();
    store
}
