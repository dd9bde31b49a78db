//! Small topology builders shared by the layout tests.

use topolayer_core::topology::{Link, Node, Topology};

use crate::graph::Connections;

/// Builds a topology from node names and `(source, target)` pairs.
///
/// Interfaces are named `e<n>` after the link's position in the list.
pub(crate) fn topology(nodes: &[&str], links: &[(&str, &str)]) -> Topology {
    let mut topology = Topology::new();
    for node in nodes {
        topology.add_node(Node::new(*node));
    }
    for (i, (source, target)) in links.iter().enumerate() {
        topology.add_link(Link::new(*source, format!("e{i}"), *target, format!("e{i}")));
    }
    topology
}

/// Like [`topology`], with a rank hint on some nodes.
pub(crate) fn hinted_topology(
    nodes: &[(&str, Option<usize>)],
    links: &[(&str, &str)],
) -> Topology {
    let mut topology = Topology::new();
    for (name, hint) in nodes {
        let node = Node::new(*name);
        topology.add_node(match hint {
            Some(rank) => node.with_rank_hint(*rank),
            None => node,
        });
    }
    for (i, (source, target)) in links.iter().enumerate() {
        topology.add_link(Link::new(*source, format!("e{i}"), *target, format!("e{i}")));
    }
    topology
}

pub(crate) fn connections(topology: &Topology) -> Connections {
    Connections::from_topology(topology)
}
