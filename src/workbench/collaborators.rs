use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{JsonMap, WorkflowDocument};
use crate::error::{BackendError, StoreError};

/// Suggested filename when generated code is saved to disk.
pub const CODE_FILENAME: &str = "workflow.py";

/// Mime type for downloaded generated code.
pub const CODE_MIME: &str = "text/python";

/// Transpilation target requested when the caller does not name one.
pub const DEFAULT_TARGET: &str = "langgraph";

/// A directory entry from the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
}

/// A stored document together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    #[serde(flatten)]
    pub document: WorkflowDocument,
}

/// The output of a transpile request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub code: String,
}

/// Persistent storage for workflow documents.
pub trait DocumentStore {
    fn list(&self) -> Result<Vec<DocumentSummary>, StoreError>;

    fn get(&self, id: &str) -> Result<WorkflowDocument, StoreError>;

    /// Stores a new document and assigns it an id.
    fn create(&mut self, template: WorkflowDocument) -> Result<DocumentRecord, StoreError>;

    /// Replaces the document stored under an existing id, returning the
    /// stored copy. Fails with [`StoreError::NotFound`] for an unknown id.
    fn put(&mut self, id: &str, document: &WorkflowDocument)
    -> Result<WorkflowDocument, StoreError>;
}

/// Execution and compilation services for stored workflows.
///
/// Both operations act on the stored copy of a document, which is why the
/// workbench persists the canvas state before delegating here.
pub trait ExecutionBackend {
    fn run(&mut self, id: &str, inputs: &JsonMap) -> Result<Value, BackendError>;

    fn transpile(&mut self, id: &str, target: &str) -> Result<GeneratedCode, BackendError>;
}

/// A source of node parameter schemas, consulted once at workbench startup.
pub trait SchemaProvider {
    /// The full `type name -> JSON Schema` mapping for every node type the
    /// backend knows.
    fn node_schemas(&self) -> Result<JsonMap, BackendError>;
}
