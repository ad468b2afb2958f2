//! The canonical workflow document model and its serialization rules.
//!
//! A [`WorkflowDocument`] is the single source of truth for a workflow. It is
//! persisted as JSON through a [`DocumentStore`](crate::workbench::DocumentStore)
//! and handed verbatim to compilation and execution backends. Every field the
//! model does not understand is retained on round trips, so documents written
//! by newer tooling survive being edited here.

pub mod model;
pub mod template;

pub use model::*;
pub use template::*;
