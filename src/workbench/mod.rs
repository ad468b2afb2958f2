//! The workflow lifecycle orchestrator.
//!
//! A [`Workbench`] ties one editing session to its three external
//! collaborators: the document store, the execution backend, and the schema
//! provider. It performs no graph work of its own. Its job is sequencing:
//! every run and transpile request commits the canvas state first, so the
//! persisted document always reflects the latest edits before a backend sees
//! it.

pub mod collaborators;
pub mod memory;

pub use collaborators::*;
pub use memory::*;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::canvas::{to_canvas, to_document};
use crate::document::{JsonMap, WorkflowDocument, starter_document};
use crate::error::WorkbenchError;
use crate::schema::SchemaCache;
use crate::session::EditSession;

struct OpenWorkflow {
    id: String,
    baseline: WorkflowDocument,
    session: EditSession,
}

/// Coordinates the editing session, storage, and execution for one open
/// workflow at a time.
pub struct Workbench {
    store: Box<dyn DocumentStore>,
    backend: Box<dyn ExecutionBackend>,
    schemas: SchemaCache,
    open: Option<OpenWorkflow>,
    busy: bool,
}

impl Workbench {
    /// Builds a workbench over its collaborators, fetching node schemas once
    /// up front. A failed fetch degrades to an empty cache: every node type
    /// then presents as "no parameters", but editing still works.
    pub fn new(
        store: Box<dyn DocumentStore>,
        backend: Box<dyn ExecutionBackend>,
        provider: &dyn SchemaProvider,
    ) -> Self {
        let schemas = match provider.node_schemas() {
            Ok(raw) => SchemaCache::new(raw),
            Err(err) => {
                warn!(error = %err, "schema fetch failed, continuing without parameter forms");
                SchemaCache::default()
            }
        };
        info!(node_types = schemas.len(), "schema cache primed");
        Self {
            store,
            backend,
            schemas,
            open: None,
            busy: false,
        }
    }

    /// The parsed node-type schemas fetched at startup.
    pub fn schemas(&self) -> &SchemaCache {
        &self.schemas
    }

    /// Whether a save, run, or transpile request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The id of the open workflow, if any.
    pub fn open_id(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.id.as_str())
    }

    /// The last-known persisted form of the open workflow. This is the
    /// baseline unedited fields are preserved against on the next save.
    pub fn document(&self) -> Option<&WorkflowDocument> {
        self.open.as_ref().map(|open| &open.baseline)
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.open.as_ref().map(|open| &open.session)
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        self.open.as_mut().map(|open| &mut open.session)
    }

    /// Lists the documents the store knows about.
    pub fn list(&self) -> Result<Vec<DocumentSummary>, WorkbenchError> {
        Ok(self.store.list()?)
    }

    /// Loads a document and replaces the current session with a fresh one
    /// over it. On failure the previously open workflow stays untouched.
    pub fn open(&mut self, id: &str) -> Result<(), WorkbenchError> {
        let document = self.store.get(id)?;
        info!(workflow_id = %id, nodes = document.nodes.len(), "workflow opened");
        let session = EditSession::new(to_canvas(&document));
        self.open = Some(OpenWorkflow {
            id: id.to_string(),
            baseline: document,
            session,
        });
        Ok(())
    }

    /// Closes the open workflow, discarding all session state.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Creates a workflow from the starter template and opens it, returning
    /// the assigned id.
    pub fn create(&mut self) -> Result<String, WorkbenchError> {
        let record = self.store.create(starter_document())?;
        self.open(&record.id)?;
        Ok(record.id)
    }

    /// Binds a node in the open session to the configuration editor,
    /// consulting the schema cache for its parameter form. Returns `false`
    /// when no workflow is open or the id is unknown.
    pub fn select(&mut self, id: &str) -> bool {
        match self.open.as_mut() {
            Some(open) => open.session.select(id, &self.schemas),
            None => false,
        }
    }

    /// Persists the current canvas state and advances the baseline.
    pub fn save(&mut self) -> Result<(), WorkbenchError> {
        self.guard_idle()?;
        self.busy = true;
        let result = self.commit();
        self.busy = false;
        result.map(|_| ())
    }

    /// Runs the open workflow with the given initial inputs. The canvas
    /// state is committed first, so execution always sees the latest edits.
    /// The backend's result or error is surfaced verbatim.
    pub fn run(&mut self, inputs: &JsonMap) -> Result<Value, WorkbenchError> {
        self.guard_idle()?;
        self.busy = true;
        let outcome = match self.commit() {
            Ok(id) => self.backend.run(&id, inputs).map_err(WorkbenchError::from),
            Err(err) => Err(err),
        };
        self.busy = false;
        outcome
    }

    /// Transpiles the open workflow to `target`, committing the canvas state
    /// first.
    pub fn transpile(&mut self, target: &str) -> Result<GeneratedCode, WorkbenchError> {
        self.guard_idle()?;
        self.busy = true;
        let outcome = match self.commit() {
            Ok(id) => self
                .backend
                .transpile(&id, target)
                .map_err(WorkbenchError::from),
            Err(err) => Err(err),
        };
        self.busy = false;
        outcome
    }

    fn guard_idle(&self) -> Result<(), WorkbenchError> {
        if self.busy {
            Err(WorkbenchError::Busy)
        } else {
            Ok(())
        }
    }

    /// Rebuilds the document from the canvas and persists it. The baseline
    /// advances only after the store accepts the write, so a failed save
    /// leaves field preservation anchored to the last good document.
    fn commit(&mut self) -> Result<String, WorkbenchError> {
        let Some(open) = self.open.as_mut() else {
            return Err(WorkbenchError::NoDocument);
        };
        let document = to_document(open.session.graph(), &open.baseline);
        self.store.put(&open.id, &document)?;
        debug!(workflow_id = %open.id, nodes = document.nodes.len(), "workflow persisted");
        open.baseline = document;
        Ok(open.id.clone())
    }
}
