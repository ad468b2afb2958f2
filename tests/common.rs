//! Common test utilities for building workflow documents and sessions.
use kairo::prelude::*;
use serde_json::json;

/// Creates the minimal two-node document: a start node wired to an end node,
/// with no stored layout.
#[allow(dead_code)]
pub fn two_node_document() -> WorkflowDocument {
    serde_json::from_value(json!({
        "nodes": [
            { "id": "start", "type": "StartNode" },
            { "id": "end", "type": "EndNode" }
        ],
        "edges": [
            { "source": "start", "target": "end" }
        ]
    }))
    .expect("Two-node document should deserialize")
}

/// Creates a document exercising field preservation: node extras, stored
/// positions, extra metadata keys, a conditional edge, edge extras, and
/// top-level extras.
#[allow(dead_code)]
pub fn annotated_document() -> WorkflowDocument {
    serde_json::from_value(json!({
        "name": "Annotated",
        "version": 3,
        "nodes": [
            {
                "id": "start",
                "type": "StartNode",
                "outputs": { "trigger": "Any" },
                "metadata": { "position": { "x": 10.0, "y": 20.0 }, "color": "teal" },
                "weight": 1.5,
                "annotations": { "owner": "platform" }
            },
            {
                "id": "check",
                "type": "Condition",
                "inputs": { "value": "start.trigger" },
                "params": { "expression": "value > 3" },
                "retry": { "count": 2, "backoff": "linear" }
            },
            { "id": "end", "type": "EndNode" }
        ],
        "edges": [
            { "source": "start", "target": "check", "priority": 7 },
            { "source": "check", "target": "end", "condition": "true" }
        ]
    }))
    .expect("Annotated document should deserialize")
}

/// Creates a schema cache over the stock node catalog.
#[allow(dead_code)]
pub fn stock_schemas() -> SchemaCache {
    SchemaCache::new(builtin_schemas())
}

/// Creates an editing session over a document's canvas projection.
#[allow(dead_code)]
pub fn session_over(document: &WorkflowDocument) -> EditSession {
    EditSession::new(to_canvas(document))
}

/// Creates a workbench over in-memory collaborators, seeded with one
/// document. Returns the workbench and the seeded document's id.
#[allow(dead_code)]
pub fn seeded_workbench(document: WorkflowDocument) -> (Workbench, String) {
    let mut store = MemoryDocumentStore::new();
    let id = store.seed(document);
    let bench = Workbench::new(
        Box::new(store),
        Box::new(MockExecutionBackend::new()),
        &StaticSchemaProvider::builtin(),
    );
    (bench, id)
}
