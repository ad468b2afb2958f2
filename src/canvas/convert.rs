use crate::document::{DocumentEdge, DocumentNode, JsonMap, Position, WorkflowDocument};

use super::types::{CanvasEdge, CanvasGraph, CanvasNode, NodeData};

/// Node type assumed when neither the canvas payload nor the stored document
/// carries one.
pub const DEFAULT_NODE_TYPE: &str = "StartNode";

/// Number of rows the fallback layout cycles through.
const FALLBACK_ROWS: usize = 4;

/// Display label for a node: its type followed by its id in parentheses.
pub fn node_label(node_type: &str, id: &str) -> String {
    format!("{node_type} ({id})")
}

/// Deterministic canvas position for the node at ordinal `index` when its
/// document stores none: a rightward drift with cycling rows, so unplaced
/// nodes never stack on a single spot.
pub fn fallback_position(index: usize) -> Position {
    Position {
        x: 100.0 + index as f64 * 150.0,
        y: 100.0 + (index % FALLBACK_ROWS) as f64 * 50.0,
    }
}

/// Projects a workflow document onto the canvas.
///
/// This function is pure and total over the document model: a node without a
/// stored position receives a fallback grid slot, a missing type produces a
/// degenerate but harmless label, and edges referencing unknown nodes pass
/// through untouched. Edge ids are synthesized from ordinal positions and are
/// never written back.
pub fn to_canvas(document: &WorkflowDocument) -> CanvasGraph {
    let nodes = document
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| CanvasNode {
            id: node.id.clone(),
            position: node
                .position()
                .unwrap_or_else(|| fallback_position(index)),
            data: NodeData {
                label: node_label(&node.node_type, &node.id),
                node: node.clone(),
            },
        })
        .collect();

    let edges = document
        .edges
        .iter()
        .enumerate()
        .map(|(index, edge)| CanvasEdge {
            id: format!("e-{index}"),
            source: edge.source.clone(),
            target: edge.target.clone(),
            label: edge.condition.clone(),
        })
        .collect();

    CanvasGraph { nodes, edges }
}

/// Rebuilds a workflow document from the canvas, consulting `original` for
/// everything the canvas never touched.
///
/// Per node, the payload carried on the canvas wins field by field, the
/// stored node fills any payload field the canvas copy lacks, and the current
/// canvas position is written into metadata last so the saved layout always
/// matches the screen. Display labels never survive the crossing. Edges are
/// reduced to source, target, and condition. All top-level document fields
/// other than `nodes` and `edges` are carried over unchanged.
pub fn to_document(graph: &CanvasGraph, original: &WorkflowDocument) -> WorkflowDocument {
    let nodes = graph
        .nodes
        .iter()
        .map(|canvas_node| merge_node(canvas_node, original.find_node(&canvas_node.id)))
        .collect();

    let edges = graph
        .edges
        .iter()
        .map(|edge| DocumentEdge {
            source: edge.source.clone(),
            target: edge.target.clone(),
            condition: edge.label.clone(),
            extra: JsonMap::new(),
        })
        .collect();

    WorkflowDocument {
        nodes,
        edges,
        extra: original.extra.clone(),
    }
}

fn merge_node(canvas_node: &CanvasNode, original: Option<&DocumentNode>) -> DocumentNode {
    let mut merged = canvas_node.data.node.clone();
    merged.id = canvas_node.id.clone();

    if merged.node_type.is_empty() {
        merged.node_type = original
            .map(|node| node.node_type.clone())
            .filter(|node_type| !node_type.is_empty())
            .unwrap_or_else(|| DEFAULT_NODE_TYPE.to_string());
    }

    if let Some(original) = original {
        if merged.inputs.is_none() {
            merged.inputs = original.inputs.clone();
        }
        if merged.params.is_none() {
            merged.params = original.params.clone();
        }
        if merged.outputs.is_none() {
            merged.outputs = original.outputs.clone();
        }
        for (key, value) in &original.extra {
            merged
                .extra
                .entry(key.as_str())
                .or_insert_with(|| value.clone());
        }
    }

    // A "label" key is display state no matter where it came from; a stored
    // node that carried one loses it here along with the derived label.
    merged.extra.remove("label");

    // Metadata is rebuilt from the stored node; the canvas owns position.
    merged.metadata = original.and_then(|node| node.metadata.clone());
    merged.set_position(canvas_node.position);

    merged
}
