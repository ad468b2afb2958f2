use serde_json::json;

use super::model::{DocumentEdge, DocumentNode, JsonMap, Position, WorkflowDocument};

/// The display name given to freshly created workflows.
pub const STARTER_NAME: &str = "New Workflow";

/// Builds the minimal two-node document used when a new workflow is created:
/// a start node wired to an end node, laid out left to right.
///
/// The payload fields of both nodes start unset and are materialized the
/// first time the node is edited, so new documents stay minimal.
pub fn starter_document() -> WorkflowDocument {
    let mut start = DocumentNode {
        id: "start".to_string(),
        node_type: "StartNode".to_string(),
        ..DocumentNode::default()
    };
    start.set_position(Position { x: 100.0, y: 100.0 });

    let mut end = DocumentNode {
        id: "end".to_string(),
        node_type: "EndNode".to_string(),
        ..DocumentNode::default()
    };
    end.set_position(Position { x: 400.0, y: 100.0 });

    let mut extra = JsonMap::new();
    extra.insert("name".to_string(), json!(STARTER_NAME));

    WorkflowDocument {
        nodes: vec![start, end],
        edges: vec![DocumentEdge {
            source: "start".to_string(),
            target: "end".to_string(),
            ..DocumentEdge::default()
        }],
        extra,
    }
}
