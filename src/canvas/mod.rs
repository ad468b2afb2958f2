//! The presentation-layer graph model and its conversions.
//!
//! Canvas types mirror what an interactive node editor renders: positioned
//! nodes with display labels and edges with synthetic ids. They are kept
//! strictly separate from the document model so that derived fields can never
//! leak into persisted JSON. The only ways across the boundary are
//! [`to_canvas`] and [`to_document`].

pub mod convert;
pub mod types;

pub use convert::*;
pub use types::*;
