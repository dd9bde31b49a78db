//! # Topolayer Clab
//!
//! Loads a [containerlab](https://containerlab.dev) topology definition into a
//! [`Topology`] for the topolayer layout engine.
//!
//! ## Usage
//!
//! ```
//! # use topolayer_clab::{parse, LoadOptions, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//! name: lab
//! topology:
//!   nodes:
//!     spine1:
//!     leaf1:
//!   links:
//!     - endpoints: ["spine1:e1-1", "leaf1:e1-49"]
//! "#;
//!
//!     let topology = parse(source, LoadOptions::default())?;
//!     assert_eq!(topology.node_count(), 2);
//!     Ok(())
//! }
//! ```

mod document;
mod error;

pub use error::ParseError;

use log::{debug, info};
use topolayer_core::topology::{Link, Node, Topology};

use document::{ClabFile, NodeBody};

/// Options controlling how a topology file is turned into a [`Topology`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    include_unlinked_nodes: bool,
}

impl LoadOptions {
    /// Keeps nodes that take part in no link.
    pub fn with_include_unlinked_nodes(mut self, include: bool) -> Self {
        self.include_unlinked_nodes = include;
        self
    }

    pub fn include_unlinked_nodes(&self) -> bool {
        self.include_unlinked_nodes
    }
}

/// Parse containerlab YAML into a topology.
///
/// Node rank hints come from the `graph-level` (or `graphlevel`) label and the
/// category from the `graph-icon` label, falling back to a guess from the node
/// name. Links that reference unknown nodes are dropped with a warning. Unless
/// [`LoadOptions::with_include_unlinked_nodes`] is set, nodes without links are
/// removed.
///
/// # Errors
///
/// Returns [`ParseError`] for malformed YAML, a document without a `topology`
/// section or a malformed link endpoint.
pub fn parse(source: &str, options: LoadOptions) -> Result<Topology, ParseError> {
    let file: ClabFile = serde_yaml::from_str(source)?;
    let links_offset = source.find("links:").unwrap_or(0);

    let mut topology = Topology::new();
    for (name, body) in file.topology.nodes.unwrap_or_default() {
        let body = body.unwrap_or_default();
        topology.add_node(node_from(name, &body));
    }

    for (index, raw) in file.topology.links.unwrap_or_default().into_iter().enumerate() {
        let endpoints = raw.endpoints.unwrap_or_default();
        if endpoints.is_empty() {
            debug!(link = index; "Skipping link without endpoints");
            continue;
        }
        let [source_end, target_end] = <[_; 2]>::try_from(endpoints).map_err(|endpoints| {
            ParseError::EndpointCount {
                link: index,
                count: endpoints.len(),
            }
        })?;
        let (source_node, source_intf) = source_end.into_parts(index, source, links_offset)?;
        let (target_node, target_intf) = target_end.into_parts(index, source, links_offset)?;
        topology.add_link(Link::new(source_node, source_intf, target_node, target_intf));
    }

    topology.drop_dangling_links();
    if !options.include_unlinked_nodes() {
        let removed = topology.retain_linked_nodes();
        if removed > 0 {
            debug!(removed; "Removed nodes without links");
        }
    }

    info!(
        lab = file.name.as_deref().unwrap_or_default(),
        nodes = topology.node_count(),
        links = topology.link_count();
        "Loaded containerlab topology"
    );
    Ok(topology)
}

fn node_from(name: String, body: &NodeBody) -> Node {
    let category = body
        .icon()
        .map_or_else(|| category_from_name(&name), str::to_string);
    let node = Node::new(name).with_category(category);
    match body.rank_hint() {
        Some(rank) => node.with_rank_hint(rank),
        None => node,
    }
}

/// Guesses a renderer category from a node name.
fn category_from_name(name: &str) -> String {
    let category = if name.contains("client") {
        "server"
    } else if name.contains("leaf") {
        "leaf"
    } else if name.contains("spine") {
        "spine"
    } else if name.contains("dcgw") {
        "dcgw"
    } else {
        "default"
    };
    category.to_string()
}
