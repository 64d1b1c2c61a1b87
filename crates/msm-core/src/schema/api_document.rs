//! OpenAPI document generation from a resolved validator.

use crate::version_number::VersionNumber;
use serde_json::{json, Map, Value};

use super::node::BSON_TYPE;

/// OpenAPI version written into every generated document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Map a BSON type name to its OpenAPI primitive.
pub fn openapi_type(bson_type: &str) -> &str {
    match bson_type {
        "date" | "objectId" | "regex" | "javascript" | "javascriptWithScope" | "timestamp"
        | "binData" | "symbol" | "dbPointer" => "string",
        "double" | "decimal" | "int" | "long" | "minKey" | "maxKey" => "number",
        "bool" => "boolean",
        other => other,
    }
}

/// Convert a MongoDB `$jsonSchema` validator into an OpenAPI schema object.
pub fn to_openapi_schema(validator: &Value) -> Value {
    match validator {
        Value::Object(fields) => Value::Object(convert_schema(fields)),
        other => other.clone(),
    }
}

fn convert_schema(fields: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(fields.len());
    for (key, value) in fields {
        match (key.as_str(), value) {
            (BSON_TYPE, bson_type) => convert_type(bson_type, &mut out),
            ("properties" | "patternProperties", Value::Object(children)) => {
                let converted = children
                    .iter()
                    .map(|(name, child)| (name.clone(), to_openapi_schema(child)))
                    .collect();
                out.insert(key.clone(), Value::Object(converted));
            }
            ("items" | "additionalProperties" | "not", Value::Object(child)) => {
                out.insert(key.clone(), Value::Object(convert_schema(child)));
            }
            ("items" | "allOf" | "anyOf" | "oneOf", Value::Array(children)) => {
                out.insert(
                    key.clone(),
                    Value::Array(children.iter().map(to_openapi_schema).collect()),
                );
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

/// Write `type` (and `nullable` for `[T, "null"]`) from a `bsonType` value.
fn convert_type(bson_type: &Value, out: &mut Map<String, Value>) {
    match bson_type {
        Value::String(name) => {
            out.insert("type".to_string(), json!(openapi_type(name)));
        }
        Value::Array(names) => {
            let mut types: Vec<&str> = Vec::new();
            for name in names.iter().filter_map(Value::as_str) {
                let mapped = openapi_type(name);
                if !types.contains(&mapped) {
                    types.push(mapped);
                }
            }
            let nullable = types.contains(&"null");
            let concrete: Vec<&str> = types.iter().copied().filter(|t| *t != "null").collect();
            match concrete.as_slice() {
                [single] => {
                    out.insert("type".to_string(), json!(single));
                    if nullable {
                        out.insert("nullable".to_string(), json!(true));
                    }
                }
                _ => {
                    out.insert("type".to_string(), json!(types));
                }
            }
        }
        other => {
            out.insert("type".to_string(), other.clone());
        }
    }
}

/// Wrap a validator in an OpenAPI envelope with one retrieval path.
pub fn build_api_document(collection: &str, version: &VersionNumber, validator: &Value) -> Value {
    let reference = format!("#/components/schemas/{collection}");

    let mut paths = Map::new();
    paths.insert(
        format!("/{collection}"),
        json!({
            "get": {
                "summary": format!("Get a {collection} document"),
                "operationId": format!("get_{collection}"),
                "responses": {
                    "200": {
                        "description": "Successful operation",
                        "content": {
                            "application/json": {"schema": {"$ref": reference}}
                        }
                    }
                }
            }
        }),
    );

    let mut schemas = Map::new();
    schemas.insert(collection.to_string(), to_openapi_schema(validator));

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {"title": collection, "version": version.to_string()},
        "paths": paths,
        "components": {"schemas": schemas}
    })
}

#[cfg(test)]
#[path = "api_document_test.rs"]
mod tests;
