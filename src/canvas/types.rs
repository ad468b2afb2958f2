use serde::Serialize;

use crate::document::{DocumentNode, Position};

/// The complete render state of a workflow on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanvasGraph {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
}

/// A node as rendered on the canvas: a position plus its display payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

/// The payload carried by a canvas node.
///
/// `label` exists only for display and never reaches the document. The
/// underlying document node travels next to it, so edits made on the canvas
/// side keep every field of the original.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub label: String,
    #[serde(flatten)]
    pub node: DocumentNode,
}

/// An edge as rendered on the canvas, with a synthetic id and display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A point in screen coordinates, as reported by a pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// The pan and zoom state of the canvas.
///
/// `x` and `y` are the screen-space translation applied to the canvas origin
/// and `zoom` is the uniform scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Converts a screen-space point into canvas coordinates by undoing the
    /// current pan and zoom.
    pub fn screen_to_canvas(&self, point: ScreenPoint) -> Position {
        Position {
            x: (point.x - self.x) / self.zoom,
            y: (point.y - self.y) / self.zoom,
        }
    }
}

impl CanvasGraph {
    /// Looks up a canvas node by its id.
    pub fn find_node(&self, id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub(crate) fn find_node_mut(&mut self, id: &str) -> Option<&mut CanvasNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }
}
