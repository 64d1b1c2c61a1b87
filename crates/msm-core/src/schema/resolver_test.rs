use super::*;
use crate::enumerators::EnumeratorCatalog;
use serde_json::json;
use std::collections::HashMap;

struct Types(HashMap<String, Value>);

impl Types {
    fn new(entries: &[(&str, Value)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }
}

impl TypeProvider for Types {
    fn type_definition(&self, name: &str) -> CoreResult<Value> {
        self.0.get(name).cloned().ok_or(CoreError::TypeNotFound {
            name: name.to_string(),
        })
    }
}

fn catalog() -> EnumeratorCatalog {
    EnumeratorCatalog::from_json_str(
        r#"[
            {"version": 0, "enumerators": {"status": {"one": "d1", "two": "d2"},
                                           "roles": {"one": "d1", "two": "d2"}}},
            {"version": 1, "enumerators": {"status": {"one": "d1", "two": "d2", "three": "d3"},
                                           "roles": {"one": "d1", "two": "d2"}}}
        ]"#,
    )
    .unwrap()
}

fn resolve(types: &Types, version: &str, source: Value) -> CoreResult<Value> {
    let catalog = catalog();
    let version = VersionNumber::parse(version).unwrap();
    SchemaResolver::new(types, &catalog, &version).resolve(source)
}

fn msm_word() -> Value {
    json!({"bsonType": "string", "pattern": "^[^\\s]{0,32}$"})
}

fn contains_directive(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.iter().any(|(k, v)| {
            k == "msmType" || k == "msmEnums" || k == "msmEnumList" || contains_directive(v)
        }),
        Value::Array(items) => items.iter().any(contains_directive),
        _ => false,
    }
}

#[test]
fn test_directive_free_schema_is_unchanged() {
    let source = json!({
        "bsonType": "object",
        "properties": {
            "name": {"bsonType": "string", "description": "The name"},
            "tags": {"bsonType": "array", "items": {"bsonType": "string"}},
            "address": {"bsonType": "object", "properties": {"zip": {"bsonType": "int"}}}
        },
        "additionalProperties": false
    });
    let resolved = resolve(&Types::new(&[]), "1.0.0.0", source.clone()).unwrap();
    assert_eq!(resolved, source);
}

#[test]
fn test_simple_type() {
    let types = Types::new(&[("msmWord", json!({"bsonType": "string", "pattern": "foo"}))]);
    let source = json!({"bsonType": "object", "properties": {
        "name": {"description": "aDescription", "msmType": "msmWord"}
    }});
    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved,
        json!({"bsonType": "object", "properties": {
            "name": {"description": "aDescription", "bsonType": "string", "pattern": "foo"}
        }})
    );
}

#[test]
fn test_type_fields_override_node_fields() {
    let types = Types::new(&[(
        "msmWord",
        json!({"description": "From the type", "bsonType": "string"}),
    )]);
    let source = json!({"bsonType": "object", "properties": {
        "name": {"description": "From the node", "bsonType": "int", "msmType": "msmWord"}
    }});
    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["name"],
        json!({"description": "From the type", "bsonType": "string"})
    );
}

#[test]
fn test_composed_type_resolves_recursively() {
    let types = Types::new(&[
        (
            "fullName",
            json!({
                "bsonType": "object",
                "properties": {
                    "firstName": {"msmType": "msmWord"},
                    "lastName": {"msmType": "msmWord"}
                },
                "additionalProperties": false
            }),
        ),
        ("msmWord", msm_word()),
    ]);
    let source = json!({"bsonType": "object", "properties": {
        "name": {"description": "aDescription", "msmType": "fullName"}
    }});

    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert!(!contains_directive(&resolved));
    assert_eq!(
        resolved,
        json!({"bsonType": "object", "properties": {
            "name": {
                "description": "aDescription",
                "bsonType": "object",
                "properties": {"firstName": msm_word(), "lastName": msm_word()},
                "additionalProperties": false
            }
        }})
    );
}

#[test]
fn test_type_that_is_array_of_type() {
    let types = Types::new(&[
        (
            "msmParagraph",
            json!({"bsonType": "array", "items": {"description": "Sentences", "msmType": "msmSentence"}}),
        ),
        ("msmSentence", json!({"bsonType": "string", "pattern": ".*132"})),
    ]);
    let source = json!({"bsonType": "object", "properties": {
        "paragraph": {"description": "aParagraphofText", "msmType": "msmParagraph"}
    }});

    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["paragraph"],
        json!({
            "description": "aParagraphofText",
            "bsonType": "array",
            "items": {"description": "Sentences", "bsonType": "string", "pattern": ".*132"}
        })
    );
}

#[test]
fn test_array_of_object_items() {
    let types = Types::new(&[("msmWord", msm_word())]);
    let source = json!({"bsonType": "object", "properties": {
        "list": {"bsonType": "array", "items": {"bsonType": "object", "properties": {
            "name": {"description": "TheName", "msmType": "msmWord"}
        }}}
    }});

    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["list"]["items"]["properties"]["name"],
        json!({"description": "TheName", "bsonType": "string", "pattern": "^[^\\s]{0,32}$"})
    );
}

#[test]
fn test_type_alias_chain_reaches_fixed_point() {
    let types = Types::new(&[
        ("identifier", json!({"msmType": "msmWord", "description": "An identifier"})),
        ("msmWord", msm_word()),
    ]);
    let source = json!({"properties": {"id": {"msmType": "identifier"}}});

    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["id"],
        json!({"description": "An identifier", "bsonType": "string", "pattern": "^[^\\s]{0,32}$"})
    );
}

#[test]
fn test_enums() {
    let source = json!({"properties": {"status": {"msmEnums": "status"}}});
    let resolved = resolve(&Types::new(&[]), "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["status"],
        json!({"bsonType": "string", "enum": ["one", "two"]})
    );
}

#[test]
fn test_enums_keep_other_fields() {
    let source = json!({"properties": {"status": {"description": "State", "msmEnums": "status"}}});
    let resolved = resolve(&Types::new(&[]), "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["status"],
        json!({"description": "State", "bsonType": "string", "enum": ["one", "two"]})
    );
}

#[test]
fn test_enum_list() {
    let source = json!({"properties": {"roles": {"msmEnumList": "roles"}}});
    let resolved = resolve(&Types::new(&[]), "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["roles"],
        json!({"bsonType": "array", "items": {"bsonType": "string", "enum": ["one", "two"]}})
    );
}

#[test]
fn test_enums_use_version_revision() {
    let source = json!({"properties": {"status": {"msmEnums": "status"}}});
    let resolved = resolve(&Types::new(&[]), "1.0.0.1", source).unwrap();
    assert_eq!(
        resolved["properties"]["status"]["enum"],
        json!(["one", "two", "three"])
    );
}

#[test]
fn test_enum_directive_inside_array_items() {
    let source = json!({"properties": {
        "history": {"bsonType": "array", "items": {"msmEnums": "status"}}
    }});
    let resolved = resolve(&Types::new(&[]), "1.0.0.0", source).unwrap();
    assert_eq!(
        resolved["properties"]["history"]["items"],
        json!({"bsonType": "string", "enum": ["one", "two"]})
    );
}

#[test]
fn test_type_introducing_enum_directive() {
    let types = Types::new(&[(
        "auditInfo",
        json!({"bsonType": "object", "properties": {
            "state": {"msmEnums": "status"},
            "by": {"msmType": "msmWord"}
        }}),
    ), ("msmWord", msm_word())]);
    let source = json!({"properties": {"audit": {"msmType": "auditInfo"}}});

    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert!(!contains_directive(&resolved));
    assert_eq!(
        resolved["properties"]["audit"]["properties"]["state"],
        json!({"bsonType": "string", "enum": ["one", "two"]})
    );
}

#[test]
fn test_missing_type() {
    let source = json!({"properties": {"name": {"msmType": "nope"}}});
    let err = resolve(&Types::new(&[]), "1.0.0.0", source).unwrap_err();
    assert!(matches!(err, CoreError::TypeNotFound { ref name } if name == "nope"));
}

#[test]
fn test_missing_enumerator() {
    let source = json!({"properties": {"name": {"msmEnums": "nope"}}});
    let err = resolve(&Types::new(&[]), "1.0.0.0", source).unwrap_err();
    assert!(matches!(err, CoreError::EnumeratorNotFound { .. }));
}

#[test]
fn test_revision_mismatch_is_a_resolution_error() {
    let catalog = EnumeratorCatalog::from_json_str(
        r#"[
            {"version": 0, "enumerators": {"status": {"one": "d1"}}},
            {"version": 1, "enumerators": {"status": {"one": "d1"}}},
            {"version": 5, "enumerators": {"status": {"one": "d1"}}}
        ]"#,
    )
    .unwrap();
    let version = VersionNumber::parse("1.0.0.2").unwrap();
    let types = Types::new(&[]);
    let err = SchemaResolver::new(&types, &catalog, &version)
        .resolve(json!({"properties": {"status": {"msmEnums": "status"}}}))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::EnumeratorRevisionMismatch {
            index: 2,
            declared: 5
        }
    ));
}

#[test]
fn test_type_cycle_rejected() {
    let types = Types::new(&[
        ("a", json!({"bsonType": "object", "properties": {"child": {"msmType": "b"}}})),
        ("b", json!({"bsonType": "object", "properties": {"parent": {"msmType": "a"}}})),
    ]);
    let source = json!({"properties": {"root": {"msmType": "a"}}});
    let err = resolve(&types, "1.0.0.0", source).unwrap_err();
    match err {
        CoreError::TypeCycle { chain } => assert_eq!(chain, "a -> b -> a"),
        other => panic!("expected TypeCycle, got {other}"),
    }
}

#[test]
fn test_same_type_in_siblings_is_not_a_cycle() {
    let types = Types::new(&[("msmWord", msm_word())]);
    let source = json!({"properties": {
        "first": {"msmType": "msmWord"},
        "second": {"msmType": "msmWord"},
        "nested": {"bsonType": "object", "properties": {"third": {"msmType": "msmWord"}}}
    }});
    let resolved = resolve(&types, "1.0.0.0", source).unwrap();
    assert!(!contains_directive(&resolved));
}

#[test]
fn test_non_object_schema_rejected() {
    let err = resolve(&Types::new(&[]), "1.0.0.0", json!([1, 2])).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSchema { .. }));
}
