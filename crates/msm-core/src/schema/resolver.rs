//! Directive resolution: turns a schema source into an install-ready validator.
//!
//! Resolution is a single bottom-up rebuild of the tree. At each node, type
//! references are expanded to a fixed point first, then enum directives are
//! applied, then `properties` and `items` are resolved recursively. Types
//! merged in at a node are therefore always expanded before any enum
//! directive they carry, and before their own children.

use crate::enumerators::EnumeratorCatalog;
use crate::error::{CoreError, CoreResult};
use crate::source::TypeProvider;
use crate::version_number::VersionNumber;
use serde_json::{json, Map, Value};

use super::node::{SchemaNode, BSON_TYPE};

/// Resolves `msmType`, `msmEnums` and `msmEnumList` directives.
pub struct SchemaResolver<'a, T: TypeProvider + ?Sized> {
    types: &'a T,
    enumerators: &'a EnumeratorCatalog,
    revision: u32,
}

impl<'a, T: TypeProvider + ?Sized> SchemaResolver<'a, T> {
    /// Create a resolver bound to the enumerator revision of `version`.
    pub fn new(types: &'a T, enumerators: &'a EnumeratorCatalog, version: &VersionNumber) -> Self {
        Self {
            types,
            enumerators,
            revision: version.enums_revision(),
        }
    }

    /// Resolve a whole schema source. The result contains no directive keys.
    pub fn resolve(&self, source: Value) -> CoreResult<Value> {
        let Value::Object(root) = source else {
            return Err(CoreError::InvalidSchema {
                context: "schema source".to_string(),
                reason: "schema must be a JSON object".to_string(),
            });
        };
        let mut chain = Vec::new();
        Ok(Value::Object(self.resolve_node(root, &mut chain)?))
    }

    /// Resolve one node. `chain` is the stack of types being expanded on the
    /// path from the root, used to reject self-referencing types.
    fn resolve_node(
        &self,
        fields: Map<String, Value>,
        chain: &mut Vec<String>,
    ) -> CoreResult<Map<String, Value>> {
        let depth = chain.len();

        let mut node = SchemaNode::parse(fields)?;
        let resolved = loop {
            node = match node {
                SchemaNode::Plain(fields) => break fields,
                SchemaNode::TypeRef { name, rest } => {
                    SchemaNode::parse(self.merge_type(&name, rest, chain)?)?
                }
                SchemaNode::EnumRef { name, mut rest } => {
                    rest.insert(BSON_TYPE.to_string(), json!("string"));
                    rest.insert("enum".to_string(), self.enum_values(&name)?);
                    SchemaNode::parse(rest)?
                }
                SchemaNode::EnumListRef { name, mut rest } => {
                    let items = json!({ BSON_TYPE: "string", "enum": self.enum_values(&name)? });
                    rest.insert(BSON_TYPE.to_string(), json!("array"));
                    rest.insert("items".to_string(), items);
                    SchemaNode::parse(rest)?
                }
            };
        };

        let result = self.resolve_children(resolved, chain);
        chain.truncate(depth);
        result
    }

    /// Merge a type definition onto a node; definition fields win.
    fn merge_type(
        &self,
        name: &str,
        mut rest: Map<String, Value>,
        chain: &mut Vec<String>,
    ) -> CoreResult<Map<String, Value>> {
        if chain.iter().any(|seen| seen == name) {
            chain.push(name.to_string());
            return Err(CoreError::TypeCycle {
                chain: chain.join(" -> "),
            });
        }

        let Value::Object(definition) = self.types.type_definition(name)? else {
            return Err(CoreError::InvalidSchema {
                context: format!("type '{name}'"),
                reason: "type definition must be a JSON object".to_string(),
            });
        };
        for (key, value) in definition {
            rest.insert(key, value);
        }

        log::debug!("Expanded type {name}");
        chain.push(name.to_string());
        Ok(rest)
    }

    fn enum_values(&self, name: &str) -> CoreResult<Value> {
        let values = self.enumerators.values(self.revision, name)?;
        Ok(Value::Array(values.into_iter().map(Value::String).collect()))
    }

    /// Recurse into object properties and array items.
    fn resolve_children(
        &self,
        mut fields: Map<String, Value>,
        chain: &mut Vec<String>,
    ) -> CoreResult<Map<String, Value>> {
        if let Some(Value::Object(properties)) = fields.get_mut("properties") {
            let mut rebuilt = Map::with_capacity(properties.len());
            for (key, value) in std::mem::take(properties) {
                let value = match value {
                    Value::Object(property) => Value::Object(self.resolve_node(property, chain)?),
                    other => other,
                };
                rebuilt.insert(key, value);
            }
            *properties = rebuilt;
        }

        if let Some(Value::Object(items)) = fields.get_mut("items") {
            *items = self.resolve_node(std::mem::take(items), chain)?;
        }

        Ok(fields)
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
