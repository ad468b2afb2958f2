use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A JSON object, used for node payloads and for fields this model passes through.
pub type JsonMap = serde_json::Map<String, Value>;

/// A position on the editing canvas, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// The canonical, persistable form of a workflow.
///
/// Only `nodes` and `edges` are interpreted. Any other top-level key is kept
/// in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub nodes: Vec<DocumentNode>,
    #[serde(default)]
    pub edges: Vec<DocumentEdge>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// A single workflow step in the canonical document.
///
/// The reserved payload fields are optional so that a key absent in the source
/// JSON stays absent when the document is written back. Unrecognized keys land
/// in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<JsonMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<JsonMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonMap>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// A directed connection between two nodes, with an optional branch condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentEdge {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl WorkflowDocument {
    /// Looks up a node by its id.
    pub fn find_node(&self, id: &str) -> Option<&DocumentNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The display name stored alongside the graph, if any.
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}

impl DocumentNode {
    /// Reads the canvas position recorded in this node's metadata.
    ///
    /// Returns `None` when the metadata block is missing or when the stored
    /// position does not have numeric `x`/`y` members, so callers can fall
    /// back to a computed layout instead of failing.
    pub fn position(&self) -> Option<Position> {
        let position = self.metadata.as_ref()?.get("position")?;
        let x = position.get("x")?.as_f64()?;
        let y = position.get("y")?.as_f64()?;
        Some(Position { x, y })
    }

    /// Records a canvas position in this node's metadata, creating the
    /// metadata block if necessary. Other metadata keys are left alone.
    pub fn set_position(&mut self, position: Position) {
        let metadata = self.metadata.get_or_insert_with(JsonMap::new);
        metadata.insert(
            "position".to_string(),
            json!({ "x": position.x, "y": position.y }),
        );
    }
}
