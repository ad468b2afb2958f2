//! # Kairo - Workflow Document Editing Core
//!
//! **Kairo** is the headless core of a visual workflow editor. It keeps a
//! canonical JSON workflow document and an interactive canvas graph in sync,
//! generates node configuration forms from backend-supplied schemas, and
//! orchestrates the save, run, and transpile lifecycle against pluggable
//! collaborators. Rendering, transport, and execution all live outside this
//! crate, behind small traits.
//!
//! ## Core Workflow
//!
//! The crate is built around one canonical model and one derived one:
//!
//! 1.  **Load a Document**: Fetch a [`document::WorkflowDocument`] through a
//!     [`workbench::DocumentStore`]. Fields the model does not interpret are
//!     preserved verbatim, so documents written by richer tooling are safe
//!     to edit here.
//! 2.  **Project onto the Canvas**: [`canvas::to_canvas`] derives the
//!     positioned, labeled graph an interactive canvas renders. The derived
//!     fields never leak back: [`canvas::to_document`] owns the reverse
//!     direction and strips them.
//! 3.  **Edit**: A [`session::EditSession`] applies user interactions (add,
//!     connect, move, configure) to the canvas graph. Node configuration
//!     runs through schema-generated forms that patch nodes atomically.
//! 4.  **Save / Run / Transpile**: The [`workbench::Workbench`] rebuilds the
//!     document from the canvas, persists it, and only then delegates to the
//!     execution backend, so backends always operate on the latest edits.
//!
//! ## Quick Start
//!
//! The following example drives the full cycle against the in-memory
//! collaborators that ship with the crate.
//!
//! ```rust,no_run
//! use kairo::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     // 1. Wire up collaborators. Swap these for real implementations in
//!     //    production deployments.
//!     let mut store = MemoryDocumentStore::new();
//!     store.seed(starter_document());
//!     let mut bench = Workbench::new(
//!         Box::new(store),
//!         Box::new(MockExecutionBackend::new()),
//!         &StaticSchemaProvider::builtin(),
//!     );
//!
//!     // 2. Open the first listed workflow.
//!     let first = bench.list()?.remove(0);
//!     bench.open(&first.id)?;
//!
//!     // 3. Edit: drop an LLM step onto the canvas and wire it in.
//!     let llm_id = {
//!         let session = bench.session_mut().ok_or("no open workflow")?;
//!         let id = session.add_node("LLM", ScreenPoint { x: 420.0, y: 180.0 });
//!         session.connect("start", &id);
//!         id
//!     };
//!
//!     // 4. Configure it through the schema-driven form.
//!     bench.select(&llm_id);
//!     {
//!         let session = bench.session_mut().ok_or("no open workflow")?;
//!         let form = session.form_mut().ok_or("no editor open")?;
//!         form.set_param("system_prompt", json!("Summarize the input."));
//!         form.inputs_text = r#"{ "prompt": "topic" }"#.to_string();
//!         session.confirm_editor()?;
//!     }
//!
//!     // 5. Persist, then hand off to the backend.
//!     bench.save()?;
//!     let generated = bench.transpile(DEFAULT_TARGET)?;
//!     println!("{}", generated.code);
//!
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod session;
pub mod workbench;
