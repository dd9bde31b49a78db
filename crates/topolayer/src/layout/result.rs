//! Layout output types.
//!
//! These are the types handed to renderers and written as JSON.

use serde::Serialize;

use topolayer_core::{
    geometry::{Point, Size},
    identifier::Id,
    orientation::Orientation,
    topology::LinkKey,
};

use super::{connector::ConnectorLayout, route::LinkStyle};

/// Placement of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    id: Id,
    rank: usize,
    /// Top-left corner of the node box.
    position: Point,
    size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl NodeLayout {
    pub(crate) fn new(
        id: Id,
        rank: usize,
        position: Point,
        size: Size,
        category: Option<String>,
    ) -> Self {
        Self {
            id,
            rank,
            position,
            size,
            category,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Routing of one link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLayout {
    key: LinkKey,
    source: Id,
    source_intf: String,
    target: Id,
    target_intf: String,
    style: LinkStyle,
}

impl LinkLayout {
    pub(crate) fn new(
        key: LinkKey,
        source: Id,
        source_intf: String,
        target: Id,
        target_intf: String,
        style: LinkStyle,
    ) -> Self {
        Self {
            key,
            source,
            source_intf,
            target,
            target_intf,
            style,
        }
    }

    pub fn key(&self) -> &LinkKey {
        &self.key
    }

    pub fn source(&self) -> &Id {
        &self.source
    }

    pub fn source_intf(&self) -> &str {
        &self.source_intf
    }

    pub fn target(&self) -> &Id {
        &self.target
    }

    pub fn target_intf(&self) -> &str {
        &self.target_intf
    }

    pub fn style(&self) -> LinkStyle {
        self.style
    }
}

/// The complete layout of a topology.
///
/// Nodes are sorted by `(rank, id)`, links keep the input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    orientation: Orientation,
    canvas: Size,
    nodes: Vec<NodeLayout>,
    links: Vec<LinkLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    connectors: Option<ConnectorLayout>,
}

impl Layout {
    pub(crate) fn new(
        orientation: Orientation,
        canvas: Size,
        nodes: Vec<NodeLayout>,
        links: Vec<LinkLayout>,
        connectors: Option<ConnectorLayout>,
    ) -> Self {
        Self {
            orientation,
            canvas,
            nodes,
            links,
            connectors,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Suggested page size: the node extent plus a border on each side.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn nodes(&self) -> &[NodeLayout] {
        &self.nodes
    }

    pub fn links(&self) -> &[LinkLayout] {
        &self.links
    }

    /// Present only when connector expansion is enabled.
    pub fn connectors(&self) -> Option<&ConnectorLayout> {
        self.connectors.as_ref()
    }

    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn link(&self, key: &str) -> Option<&LinkLayout> {
        self.links.iter().find(|link| link.key.as_str() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
