//! Schema-driven form generation for node parameters.
//!
//! Node types advertise their configurable parameters as JSON Schema objects,
//! typically produced by the backend's model definitions. This module parses
//! those schemas into a flat field list a configuration editor can render
//! through a fixed kind-to-widget mapping, with no node-type-specific code
//! paths anywhere.

pub mod builtin;
pub mod cache;
pub mod form;

pub use builtin::*;
pub use cache::*;
pub use form::*;
