use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value;

use super::form::{FieldSpec, ParamSchema};

/// Parsed node-type schemas, fetched once at startup and consulted for every
/// form the configuration editor opens.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    schemas: AHashMap<String, ParamSchema>,
}

impl SchemaCache {
    /// Builds the cache from a raw `type name -> JSON Schema` mapping as a
    /// schema provider delivers it. Entries that are not recognizable object
    /// schemas degrade to "no parameters" instead of poisoning the cache.
    pub fn new(raw: impl IntoIterator<Item = (String, Value)>) -> Self {
        let schemas = raw
            .into_iter()
            .map(|(name, schema)| (name, ParamSchema::parse(&schema)))
            .collect();
        Self { schemas }
    }

    /// The parsed schema registered for a node type, if any.
    pub fn get(&self, node_type: &str) -> Option<&ParamSchema> {
        self.schemas.get(node_type)
    }

    /// The form fields for a node type. Unknown types yield an empty list,
    /// which the editor treats the same as a schema with no fields.
    pub fn form_fields(&self, node_type: &str) -> &[FieldSpec] {
        self.schemas
            .get(node_type)
            .map(|schema| schema.fields.as_slice())
            .unwrap_or(&[])
    }

    /// All registered node types in display order.
    pub fn node_types(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
