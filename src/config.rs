//! The node configuration editor.
//!
//! A [`NodeConfigForm`] is opened over one node, edited freely, and confirmed
//! into a single [`NodePatch`]. The form owns private copies of everything it
//! touches. The underlying graph is only changed when a save succeeds and the
//! session applies the resulting patch, so a failed save or a discarded form
//! leaves the node exactly as it was.

use serde_json::Value;

use crate::document::{DocumentNode, JsonMap};
use crate::error::ConfigError;
use crate::schema::{FieldSpec, SchemaCache};

/// Informational text shown in place of the parameter form when a node type
/// declares no configurable fields.
pub const NO_PARAMS_PLACEHOLDER: &str = "No parameters available for this node type.";

/// The atomic result of a confirmed configuration edit.
///
/// `original_id` names the node the patch applies to; `id` differs from it
/// when the user renamed the node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePatch {
    pub original_id: String,
    pub id: String,
    pub inputs: JsonMap,
    pub params: JsonMap,
    pub outputs: JsonMap,
}

/// Editing state for a single node's configuration.
#[derive(Debug, Clone)]
pub struct NodeConfigForm {
    original_id: String,
    node_type: String,
    fields: Vec<FieldSpec>,
    /// The node id as currently typed.
    pub id_text: String,
    /// The inputs mapping as currently typed, JSON text.
    pub inputs_text: String,
    /// The outputs mapping as currently typed, JSON text.
    pub outputs_text: String,
    params: JsonMap,
}

impl NodeConfigForm {
    /// Opens a form over a node's current configuration.
    ///
    /// `inputs` and `outputs` are presented as pretty-printed JSON text.
    /// Parameter fields come from the schema registered for the node's type.
    /// Fields the node holds no value for yet are seeded with their schema
    /// defaults, matching what a schema-driven form renderer displays.
    pub fn open(node: &DocumentNode, schemas: &SchemaCache) -> Self {
        let fields = schemas.form_fields(&node.node_type).to_vec();

        let mut params = node.params.clone().unwrap_or_default();
        for field in &fields {
            if let Some(default) = &field.default
                && !params.contains_key(&field.name)
            {
                params.insert(field.name.clone(), default.clone());
            }
        }

        Self {
            original_id: node.id.clone(),
            node_type: node.node_type.clone(),
            fields,
            id_text: node.id.clone(),
            inputs_text: pretty_json(&node.inputs),
            outputs_text: pretty_json(&node.outputs),
            params,
        }
    }

    /// The id of the node this form was opened on.
    pub fn original_id(&self) -> &str {
        &self.original_id
    }

    /// The node's type. Types are fixed once a node exists, so the editor
    /// exposes this read-only.
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// The parameter fields the form renders, in display order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Whether the form has any parameter fields to render. When it does
    /// not, shells display [`NO_PARAMS_PLACEHOLDER`] instead.
    pub fn has_params(&self) -> bool {
        !self.fields.is_empty()
    }

    /// The current value of one parameter field.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// The complete parameter mapping as currently edited.
    pub fn params(&self) -> &JsonMap {
        &self.params
    }

    /// Records a parameter value as edited through its widget. Values are
    /// checked at save time, so intermediate editing states are never
    /// rejected here.
    pub fn set_param(&mut self, name: impl Into<String>, value: Value) {
        self.params.insert(name.into(), value);
    }

    /// Confirms the edit, producing the patch to apply.
    ///
    /// The save is all-or-nothing: the first malformed JSON text field or
    /// constraint-violating parameter aborts it with a single error, and
    /// since the form is not consumed, the editor stays open with its state
    /// intact.
    pub fn save(&self) -> Result<NodePatch, ConfigError> {
        let inputs = parse_json_object(&self.inputs_text, "inputs")?;
        let outputs = parse_json_object(&self.outputs_text, "outputs")?;

        for field in &self.fields {
            if let Some(value) = self.params.get(&field.name) {
                field.validate(value)?;
            }
        }

        Ok(NodePatch {
            original_id: self.original_id.clone(),
            id: self.id_text.clone(),
            inputs,
            params: self.params.clone(),
            outputs,
        })
    }
}

fn pretty_json(map: &Option<JsonMap>) -> String {
    let value = Value::Object(map.clone().unwrap_or_default());
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

fn parse_json_object(text: &str, field: &str) -> Result<JsonMap, ConfigError> {
    serde_json::from_str(text).map_err(|err| ConfigError::InvalidJson {
        field: field.to_string(),
        message: err.to_string(),
    })
}
