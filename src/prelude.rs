//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! kairo crate. Import this module to get access to the core functionality
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! // Use the prelude to get easy access to all the core types.
//! use kairo::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Load a stored document and project it onto the canvas
//! let text = std::fs::read_to_string("path/to/workflow.json")?;
//! let document: WorkflowDocument = serde_json::from_str(&text)?;
//! let graph = to_canvas(&document);
//!
//! // Edit it through a session, then rebuild the document
//! let mut session = EditSession::new(graph);
//! let id = session.add_node("Tool", ScreenPoint { x: 300.0, y: 200.0 });
//! session.connect("start", &id);
//! let updated = to_document(session.graph(), &document);
//!
//! println!("{}", serde_json::to_string_pretty(&updated)?);
//! # Ok(())
//! # }
//! ```

// Document model
pub use crate::document::{
    DocumentEdge, DocumentNode, JsonMap, Position, WorkflowDocument, starter_document,
};

// Canvas model and conversions
pub use crate::canvas::{
    CanvasEdge, CanvasGraph, CanvasNode, NodeData, ScreenPoint, Viewport, to_canvas, to_document,
};

// Schema-driven configuration
pub use crate::config::{NodeConfigForm, NodePatch};
pub use crate::schema::{FieldKind, FieldSpec, ParamSchema, SchemaCache, Widget, builtin_schemas};

// Session and orchestration
pub use crate::session::EditSession;
pub use crate::workbench::{
    CODE_FILENAME, CODE_MIME, DEFAULT_TARGET, DocumentRecord, DocumentStore, DocumentSummary,
    ExecutionBackend, GeneratedCode, MemoryDocumentStore, MockExecutionBackend, SchemaProvider,
    StaticSchemaProvider, Workbench,
};

// Error types
pub use crate::error::{BackendError, ConfigError, StoreError, WorkbenchError};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
