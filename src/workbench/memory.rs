//! Process-local collaborators for demos, offline tooling, and tests.

use ahash::AHashMap;
use itertools::Itertools;
use serde_json::{Value, json};

use crate::document::{JsonMap, WorkflowDocument};
use crate::error::{BackendError, StoreError};
use crate::schema::builtin_schemas;

use super::collaborators::{
    DEFAULT_TARGET, DocumentRecord, DocumentStore, DocumentSummary, ExecutionBackend,
    GeneratedCode, SchemaProvider,
};

/// A document store backed by a process-local map.
///
/// Ids are assigned as `wf-1`, `wf-2`, and so on, and listings follow
/// creation order. Documents listed without a stored name appear as
/// "Untitled".
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: AHashMap<String, WorkflowDocument>,
    next_id: u64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document directly, returning its assigned id.
    pub fn seed(&mut self, document: WorkflowDocument) -> String {
        self.next_id += 1;
        let id = format!("wf-{}", self.next_id);
        self.documents.insert(id.clone(), document);
        id
    }
}

/// Listing sort key: the assigned serial, so `wf-10` lists after `wf-9`
/// rather than between `wf-1` and `wf-2`. Ids without a parsable serial
/// fall back to their textual order at the end.
fn creation_order(id: &str) -> (u64, &str) {
    let serial = id
        .strip_prefix("wf-")
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(u64::MAX);
    (serial, id)
}

impl DocumentStore for MemoryDocumentStore {
    fn list(&self) -> Result<Vec<DocumentSummary>, StoreError> {
        Ok(self
            .documents
            .iter()
            .map(|(id, document)| DocumentSummary {
                id: id.clone(),
                name: document.name().unwrap_or("Untitled").to_string(),
            })
            .sorted_by(|a, b| creation_order(&a.id).cmp(&creation_order(&b.id)))
            .collect())
    }

    fn get(&self, id: &str) -> Result<WorkflowDocument, StoreError> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create(&mut self, template: WorkflowDocument) -> Result<DocumentRecord, StoreError> {
        let id = self.seed(template.clone());
        Ok(DocumentRecord {
            id,
            document: template,
        })
    }

    fn put(
        &mut self,
        id: &str,
        document: &WorkflowDocument,
    ) -> Result<WorkflowDocument, StoreError> {
        if !self.documents.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.documents.insert(id.to_string(), document.clone());
        Ok(document.clone())
    }
}

/// A canned execution backend.
///
/// `run` echoes the request around a fixed payload while `supports_run`
/// holds, and otherwise reports the operation as unsupported the way a
/// compile-only deployment would. `transpile` accepts only the default
/// target and emits a placeholder module, so download flows have real bytes
/// to handle.
#[derive(Debug, Clone)]
pub struct MockExecutionBackend {
    pub supports_run: bool,
    pub run_result: Value,
}

impl Default for MockExecutionBackend {
    fn default() -> Self {
        Self {
            supports_run: true,
            run_result: json!({ "status": "completed" }),
        }
    }
}

impl MockExecutionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that rejects every run request as unsupported.
    pub fn without_execution() -> Self {
        Self {
            supports_run: false,
            ..Self::default()
        }
    }
}

impl ExecutionBackend for MockExecutionBackend {
    fn run(&mut self, id: &str, inputs: &JsonMap) -> Result<Value, BackendError> {
        if !self.supports_run {
            return Err(BackendError::Unsupported(
                "Execution is not supported by the active backend".to_string(),
            ));
        }
        Ok(json!({
            "workflow": id,
            "inputs": inputs,
            "result": self.run_result,
        }))
    }

    fn transpile(&mut self, id: &str, target: &str) -> Result<GeneratedCode, BackendError> {
        if target != DEFAULT_TARGET {
            return Err(BackendError::Unsupported(format!(
                "Unsupported target: {target}"
            )));
        }
        Ok(GeneratedCode {
            code: format!("# Generated from workflow '{id}'\n\n\ndef main():\n    pass\n"),
        })
    }
}

/// A schema provider serving a fixed mapping.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaProvider {
    schemas: JsonMap,
}

impl StaticSchemaProvider {
    pub fn new(schemas: JsonMap) -> Self {
        Self { schemas }
    }

    /// A provider preloaded with the stock node set.
    pub fn builtin() -> Self {
        Self::new(builtin_schemas())
    }
}

impl SchemaProvider for StaticSchemaProvider {
    fn node_schemas(&self) -> Result<JsonMap, BackendError> {
        Ok(self.schemas.clone())
    }
}
