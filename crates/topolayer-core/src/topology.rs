//! The topology model handed to the layout engine.
//!
//! A [`Topology`] is a node table plus an ordered link list. Nodes keep their
//! insertion order (the order of the source description); every ordering that
//! influences the layout is derived from node identifiers instead.

use std::fmt;

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::identifier::Id;

/// Referential integrity errors of a [`Topology`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("link `{link}` references unknown node `{node}`")]
    UnknownNode { link: LinkKey, node: Id },
}

/// A node of the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: Id,
    rank_hint: Option<usize>,
    category: Option<String>,
}

impl Node {
    /// Creates a node without rank hint or category.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            rank_hint: None,
            category: None,
        }
    }

    /// Pins the node's rank to at least `rank`.
    pub fn with_rank_hint(mut self, rank: usize) -> Self {
        self.rank_hint = Some(rank);
        self
    }

    /// Attaches a renderer category (icon group) to the node.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns the manual rank hint, if any.
    pub fn rank_hint(&self) -> Option<usize> {
        self.rank_hint
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Stable identifier of a link: `source:source_intf:target:target_intf`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LinkKey(String);

impl LinkKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed link between two node interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    source: Id,
    source_intf: String,
    target: Id,
    target_intf: String,
}

impl Link {
    /// Creates a link from `source:source_intf` to `target:target_intf`.
    pub fn new(
        source: impl Into<Id>,
        source_intf: impl Into<String>,
        target: impl Into<Id>,
        target_intf: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            source_intf: source_intf.into(),
            target: target.into(),
            target_intf: target_intf.into(),
        }
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

    /// Returns the stable key of this link.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topolayer_core::topology::Link;
    /// let link = Link::new("leaf1", "e1-49", "spine1", "e1-1");
    /// assert_eq!(link.key().as_str(), "leaf1:e1-49:spine1:e1-1");
    /// ```
    pub fn key(&self) -> LinkKey {
        LinkKey(format!(
            "{}:{}:{}:{}",
            self.source, self.source_intf, self.target, self.target_intf
        ))
    }

    /// Returns the endpoints as an unordered pair (smaller id first).
    ///
    /// Links sharing a pair are parallel links.
    pub fn endpoint_pair(&self) -> (&Id, &Id) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }
}

/// Node table and link list of one topology.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: IndexMap<Id, Node>,
    links: Vec<Link>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, replacing (and returning) an existing node with the same id.
    pub fn add_node(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Appends a link. Endpoints are not checked here, see [`Topology::validate`].
    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Builder-style [`Topology::add_node`].
    pub fn with_node(mut self, node: Node) -> Self {
        self.add_node(node);
        self
    }

    /// Builder-style [`Topology::add_link`].
    pub fn with_link(mut self, link: Link) -> Self {
        self.add_link(link);
        self
    }

    /// Returns the nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns the links in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes links whose endpoints are missing from the node table.
    ///
    /// Returns the removed links.
    pub fn drop_dangling_links(&mut self) -> Vec<Link> {
        let (kept, dropped): (Vec<_>, Vec<_>) = self
            .links
            .drain(..)
            .partition(|link| {
                self.nodes.contains_key(link.source.as_str())
                    && self.nodes.contains_key(link.target.as_str())
            });
        self.links = kept;

        for link in &dropped {
            warn!(link = link.key().as_str(); "Dropping link with unknown endpoint");
        }
        dropped
    }

    /// Removes nodes that take part in no link.
    ///
    /// Returns the number of removed nodes.
    pub fn retain_linked_nodes(&mut self) -> usize {
        let before = self.nodes.len();
        let links = &self.links;
        self.nodes.retain(|id, _| {
            links
                .iter()
                .any(|link| link.source == *id || link.target == *id)
        });
        before - self.nodes.len()
    }

    /// Checks that every link endpoint exists in the node table.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownNode`] for the first offending link.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for link in &self.links {
            for endpoint in [&link.source, &link.target] {
                if !self.nodes.contains_key(endpoint.as_str()) {
                    return Err(TopologyError::UnknownNode {
                        link: link.key(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Topology {
        Topology::new()
            .with_node(Node::new("spine1").with_rank_hint(1))
            .with_node(Node::new("leaf1").with_category("leaf"))
            .with_node(Node::new("client1"))
            .with_link(Link::new("spine1", "e1-1", "leaf1", "e1-49"))
    }

    #[test]
    fn test_node_accessors() {
        let topo = sample();
        let spine = topo.node("spine1").unwrap();
        assert_eq!(spine.rank_hint(), Some(1));
        assert_eq!(spine.category(), None);
        assert_eq!(topo.node("leaf1").unwrap().category(), Some("leaf"));
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let ids: Vec<_> = sample().nodes().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, vec!["spine1", "leaf1", "client1"]);
    }

    #[test]
    fn test_add_node_replaces_duplicate() {
        let mut topo = sample();
        let previous = topo.add_node(Node::new("leaf1"));
        assert_eq!(previous.unwrap().category(), Some("leaf"));
        assert_eq!(topo.node_count(), 3);
    }

    #[test]
    fn test_endpoint_pair_is_unordered() {
        let forward = Link::new("b", "e1", "a", "e2");
        let backward = Link::new("a", "e3", "b", "e4");
        assert_eq!(forward.endpoint_pair(), backward.endpoint_pair());
    }

    #[test]
    fn test_validate_reports_unknown_endpoint() {
        let topo = sample().with_link(Link::new("leaf1", "e1-1", "ghost", "eth0"));
        let err = topo.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "link `leaf1:e1-1:ghost:eth0` references unknown node `ghost`"
        );
    }

    #[test]
    fn test_drop_dangling_links() {
        let mut topo = sample().with_link(Link::new("ghost", "e1", "leaf1", "e2"));
        let dropped = topo.drop_dangling_links();
        assert_eq!(dropped.len(), 1);
        assert_eq!(topo.link_count(), 1);
        assert!(topo.validate().is_ok());
    }

    #[test]
    fn test_retain_linked_nodes() {
        let mut topo = sample();
        assert_eq!(topo.retain_linked_nodes(), 1);
        assert!(!topo.contains_node("client1"));
        assert_eq!(topo.node_count(), 2);
    }
}
