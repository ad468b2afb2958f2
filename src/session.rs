//! The live editing session over one open workflow.
//!
//! An [`EditSession`] owns the canvas graph plus all transient interaction
//! state: pan and zoom, the context menu, and the node currently bound to the
//! configuration editor. Sessions are created when a document is opened and
//! replaced wholesale when another document takes its place, so no editing
//! state ever crosses from one document to the next.

use serde_json::json;
use tracing::debug;

use crate::canvas::{
    CanvasEdge, CanvasGraph, CanvasNode, NodeData, ScreenPoint, Viewport, node_label,
};
use crate::config::{NodeConfigForm, NodePatch};
use crate::document::{DocumentNode, JsonMap, Position};
use crate::error::ConfigError;
use crate::schema::SchemaCache;

/// An open context menu, anchored at the screen point that summoned it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub anchor: ScreenPoint,
}

/// Interactive editing state for one open workflow.
#[derive(Debug)]
pub struct EditSession {
    graph: CanvasGraph,
    viewport: Viewport,
    menu: Option<ContextMenu>,
    form: Option<NodeConfigForm>,
    next_serial: u64,
}

impl EditSession {
    pub fn new(graph: CanvasGraph) -> Self {
        Self {
            graph,
            viewport: Viewport::default(),
            menu: None,
            form: None,
            next_serial: 1,
        }
    }

    /// The canvas graph in its current edited state.
    pub fn graph(&self) -> &CanvasGraph {
        &self.graph
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Opens the context menu at a screen point. Invoked on a secondary
    /// activation over empty canvas.
    pub fn open_menu(&mut self, anchor: ScreenPoint) {
        self.menu = Some(ContextMenu { anchor });
    }

    /// The open context menu, if any.
    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    /// A primary click on the canvas dismisses the context menu.
    pub fn canvas_click(&mut self) {
        self.menu = None;
    }

    /// Adds a node of the given type at a screen position and returns its id.
    ///
    /// The id is synthesized from the lowercased type name and a suffix that
    /// only ever counts up within this session. Existing ids are not
    /// consulted; a colliding id in a loaded document is passed through for
    /// downstream tooling to reject.
    pub fn add_node(&mut self, node_type: &str, at: ScreenPoint) -> String {
        let id = format!("{}-{}", node_type.to_lowercase(), self.next_serial);
        self.next_serial += 1;
        let position = self.viewport.screen_to_canvas(at);

        let mut outputs = JsonMap::new();
        outputs.insert("output".to_string(), json!("Any"));
        let node = DocumentNode {
            id: id.clone(),
            node_type: node_type.to_string(),
            inputs: Some(JsonMap::new()),
            params: Some(JsonMap::new()),
            outputs: Some(outputs),
            ..DocumentNode::default()
        };

        debug!(node_id = %id, node_type = %node_type, "node added");
        self.graph.nodes.push(CanvasNode {
            id: id.clone(),
            position,
            data: NodeData {
                label: node_label(node_type, &id),
                node,
            },
        });
        id
    }

    /// Completes an "add node" selection from the open context menu: the new
    /// node lands at the menu anchor and the menu closes. Returns `None`
    /// when no menu is open.
    pub fn add_node_from_menu(&mut self, node_type: &str) -> Option<String> {
        let menu = self.menu.take()?;
        Some(self.add_node(node_type, menu.anchor))
    }

    /// Appends an edge for a user-drawn connection. No cycle or type
    /// compatibility check happens here.
    pub fn connect(&mut self, source: &str, target: &str) {
        let id = format!("e-{}", self.graph.edges.len());
        self.graph.edges.push(CanvasEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            label: None,
        });
    }

    /// Updates a node's canvas position. Pure view state until the next save
    /// writes it into metadata. Returns `false` for an unknown id.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        match self.graph.find_node_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Binds a node to the configuration editor and opens it. Returns
    /// `false` for an unknown id.
    pub fn select(&mut self, id: &str, schemas: &SchemaCache) -> bool {
        match self.graph.find_node(id) {
            Some(node) => {
                self.form = Some(NodeConfigForm::open(&node.data.node, schemas));
                true
            }
            None => false,
        }
    }

    /// The open configuration editor, if a node is selected.
    pub fn form(&self) -> Option<&NodeConfigForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut NodeConfigForm> {
        self.form.as_mut()
    }

    /// The id of the node currently bound to the configuration editor.
    pub fn selected(&self) -> Option<&str> {
        self.form.as_ref().map(NodeConfigForm::original_id)
    }

    /// Closes the configuration editor, discarding unconfirmed edits.
    pub fn close_editor(&mut self) {
        self.form = None;
    }

    /// Confirms the open editor: validates its state, applies the resulting
    /// patch, and closes it. A validation failure leaves the editor open and
    /// the graph untouched. Returns `false` when no editor is open.
    pub fn confirm_editor(&mut self) -> Result<bool, ConfigError> {
        let Some(form) = &self.form else {
            return Ok(false);
        };
        let patch = form.save()?;
        self.apply_patch(&patch);
        self.form = None;
        Ok(true)
    }

    /// Merges a configuration patch into its target node, recomputing the
    /// display label. When the patch renames the node, every edge endpoint
    /// referencing the old id is rewritten to follow it.
    pub fn apply_patch(&mut self, patch: &NodePatch) -> bool {
        let Some(node) = self.graph.find_node_mut(&patch.original_id) else {
            return false;
        };

        node.id = patch.id.clone();
        node.data.node.id = patch.id.clone();
        node.data.node.inputs = Some(patch.inputs.clone());
        node.data.node.params = Some(patch.params.clone());
        node.data.node.outputs = Some(patch.outputs.clone());
        node.data.label = node_label(&node.data.node.node_type, &patch.id);

        if patch.id != patch.original_id {
            debug!(old_id = %patch.original_id, new_id = %patch.id, "node renamed, following edge endpoints");
            for edge in &mut self.graph.edges {
                if edge.source == patch.original_id {
                    edge.source = patch.id.clone();
                }
                if edge.target == patch.original_id {
                    edge.target = patch.id.clone();
                }
            }
        }
        true
    }
}
