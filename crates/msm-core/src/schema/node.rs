//! Directive classification of schema nodes.
//!
//! A node is parsed once into a [`SchemaNode`] so the resolver can match on
//! the directive instead of probing keys repeatedly.

use crate::error::{CoreError, CoreResult};
use serde_json::{Map, Value};

/// Key that names a custom type to merge into the node.
pub const TYPE_DIRECTIVE: &str = "msmType";
/// Key that names an enumerator whose values constrain a string.
pub const ENUMS_DIRECTIVE: &str = "msmEnums";
/// Key that names an enumerator whose values constrain an array of strings.
pub const ENUM_LIST_DIRECTIVE: &str = "msmEnumList";

/// Key MongoDB validators use for primitive type names.
pub const BSON_TYPE: &str = "bsonType";

/// Directives in the order they are resolved on a single node.
const DIRECTIVES: [&str; 3] = [TYPE_DIRECTIVE, ENUMS_DIRECTIVE, ENUM_LIST_DIRECTIVE];

/// A schema node with its (first) directive split out.
///
/// `rest` holds every other field of the node, directive key removed.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// No directive; only structural recursion applies.
    Plain(Map<String, Value>),
    /// `msmType`: merge a custom type definition.
    TypeRef {
        name: String,
        rest: Map<String, Value>,
    },
    /// `msmEnums`: constrain to the values of an enumerator.
    EnumRef {
        name: String,
        rest: Map<String, Value>,
    },
    /// `msmEnumList`: array whose items are constrained to an enumerator.
    EnumListRef {
        name: String,
        rest: Map<String, Value>,
    },
}

impl SchemaNode {
    /// Classify a node. Type references win over enum directives so that a
    /// merged type can still contribute (or be refined by) enum directives.
    pub fn parse(mut fields: Map<String, Value>) -> CoreResult<Self> {
        for directive in DIRECTIVES {
            let Some(value) = fields.shift_remove(directive) else {
                continue;
            };
            let name = match value {
                Value::String(name) if !name.is_empty() => name,
                other => {
                    return Err(CoreError::InvalidDirective {
                        directive: directive.to_string(),
                        reason: format!("expected a non-empty name, found {other}"),
                    })
                }
            };
            let rest = fields;
            return Ok(match directive {
                TYPE_DIRECTIVE => SchemaNode::TypeRef { name, rest },
                ENUMS_DIRECTIVE => SchemaNode::EnumRef { name, rest },
                _ => SchemaNode::EnumListRef { name, rest },
            });
        }
        Ok(SchemaNode::Plain(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn test_plain_node() {
        let node = SchemaNode::parse(object(json!({"bsonType": "string"}))).unwrap();
        assert!(matches!(node, SchemaNode::Plain(_)));
    }

    #[test]
    fn test_type_ref_strips_directive() {
        let node =
            SchemaNode::parse(object(json!({"description": "d", "msmType": "msmWord"}))).unwrap();
        assert_eq!(
            node,
            SchemaNode::TypeRef {
                name: "msmWord".to_string(),
                rest: object(json!({"description": "d"})),
            }
        );
    }

    #[test]
    fn test_type_ref_takes_priority_over_enums() {
        let node =
            SchemaNode::parse(object(json!({"msmEnums": "status", "msmType": "word"}))).unwrap();
        match node {
            SchemaNode::TypeRef { name, rest } => {
                assert_eq!(name, "word");
                assert_eq!(rest.get("msmEnums"), Some(&json!("status")));
            }
            other => panic!("expected TypeRef, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_list_ref() {
        let node = SchemaNode::parse(object(json!({"msmEnumList": "roles"}))).unwrap();
        assert!(matches!(node, SchemaNode::EnumListRef { ref name, .. } if name == "roles"));
    }

    #[test]
    fn test_non_string_directive_rejected() {
        let err = SchemaNode::parse(object(json!({"msmEnums": 3}))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDirective { ref directive, .. } if directive == "msmEnums"));

        assert!(SchemaNode::parse(object(json!({"msmType": ""}))).is_err());
    }
}
