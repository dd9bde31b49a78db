//! Connectivity of a topology.
//!
//! [`Connections`] keeps, for every node, the set of upstream (incoming) and
//! downstream (outgoing) neighbours. It is derived once from the link list and
//! stays immutable for the rest of the pipeline. The directed graph itself is
//! stored in a petgraph [`DiGraph`] so traversals (cycle detection) can reuse
//! petgraph's visitors.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::{DfsEvent, depth_first_search},
};

use topolayer_core::{identifier::Id, topology::Topology};

/// Upstream and downstream neighbour sets of every node.
#[derive(Debug, Clone)]
pub struct Connections {
    graph: DiGraph<Id, ()>,
    indices: BTreeMap<Id, NodeIndex>,
    upstream: BTreeMap<Id, BTreeSet<Id>>,
    downstream: BTreeMap<Id, BTreeSet<Id>>,
}

impl Connections {
    /// Builds the connections of `topology`.
    ///
    /// Parallel links collapse into one edge. Links with an endpoint missing
    /// from the node table are ignored.
    pub fn from_topology(topology: &Topology) -> Self {
        let ids: BTreeSet<&Id> = topology.nodes().map(|node| node.id()).collect();

        let mut graph = DiGraph::with_capacity(ids.len(), topology.link_count());
        let mut indices = BTreeMap::new();
        let mut upstream = BTreeMap::new();
        let mut downstream = BTreeMap::new();
        for &id in &ids {
            indices.insert(id.clone(), graph.add_node(id.clone()));
            upstream.insert(id.clone(), BTreeSet::new());
            downstream.insert(id.clone(), BTreeSet::new());
        }

        let pairs: BTreeSet<(&Id, &Id)> = topology
            .links()
            .iter()
            .filter(|link| ids.contains(link.source()) && ids.contains(link.target()))
            .map(|link| (link.source(), link.target()))
            .collect();

        for (source, target) in pairs {
            if let (Some(&from), Some(&to)) = (indices.get(source), indices.get(target)) {
                graph.add_edge(from, to, ());
            }
            if let Some(set) = downstream.get_mut(source) {
                set.insert(target.clone());
            }
            if let Some(set) = upstream.get_mut(target) {
                set.insert(source.clone());
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Connections built"
        );

        Self {
            graph,
            indices,
            upstream,
            downstream,
        }
    }

    /// Returns all node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = &Id> {
        self.indices.keys()
    }

    pub fn node_count(&self) -> usize {
        self.indices.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    /// Returns the nodes with a link into `id`, in ascending order.
    pub fn upstream(&self, id: &str) -> impl Iterator<Item = &Id> {
        self.upstream.get(id).into_iter().flatten()
    }

    /// Returns the nodes `id` links to, in ascending order.
    pub fn downstream(&self, id: &str) -> impl Iterator<Item = &Id> {
        self.downstream.get(id).into_iter().flatten()
    }

    pub fn has_upstream(&self, id: &str) -> bool {
        self.upstream.get(id).is_some_and(|set| !set.is_empty())
    }

    /// Returns the neighbours of `id` regardless of link direction.
    pub fn neighbors(&self, id: &str) -> BTreeSet<&Id> {
        self.upstream(id).chain(self.downstream(id)).collect()
    }

    /// Number of distinct neighbours of `id` regardless of link direction.
    pub fn degree(&self, id: &str) -> usize {
        self.neighbors(id).len()
    }

    /// Returns whether a link runs from `from` to `to`.
    pub fn has_link(&self, from: &str, to: &str) -> bool {
        self.downstream
            .get(from)
            .is_some_and(|set| set.contains(to))
    }

    /// Finds the edges that close a cycle.
    ///
    /// A depth-first search starts from each of `seeds` in turn (skipping nodes
    /// already visited); every edge into a node that is still on the search
    /// stack is reported as `(source, target)`. Nodes unreachable from the
    /// seeds are not searched.
    pub fn back_edges<'a>(&self, seeds: impl IntoIterator<Item = &'a Id>) -> BTreeSet<(Id, Id)> {
        let starts: Vec<NodeIndex> = seeds
            .into_iter()
            .filter_map(|id| self.indices.get(id.as_str()).copied())
            .collect();

        let mut back_edges = BTreeSet::new();
        depth_first_search(&self.graph, starts, |event| {
            if let DfsEvent::BackEdge(source, target) = event {
                let source = self.graph[source].clone();
                let target = self.graph[target].clone();
                trace!(source:%, target:%; "Ignoring cycle-closing edge");
                back_edges.insert((source, target));
            }
        });
        back_edges
    }
}

#[cfg(test)]
mod tests {
    use topolayer_core::topology::{Link, Node};

    use super::*;

    fn topology(nodes: &[&str], links: &[(&str, &str)]) -> Topology {
        let mut topology = Topology::new();
        for node in nodes {
            topology.add_node(Node::new(*node));
        }
        for (i, (source, target)) in links.iter().enumerate() {
            topology.add_link(Link::new(*source, format!("e{i}"), *target, format!("e{i}")));
        }
        topology
    }

    #[test]
    fn test_neighbour_sets() {
        let connections = Connections::from_topology(&topology(
            &["a", "b", "c"],
            &[("a", "b"), ("a", "c"), ("b", "c")],
        ));

        let downstream: Vec<_> = connections.downstream("a").collect();
        assert_eq!(downstream, vec!["b", "c"]);
        let upstream: Vec<_> = connections.upstream("c").collect();
        assert_eq!(upstream, vec!["a", "b"]);
        assert!(!connections.has_upstream("a"));
        assert!(connections.has_upstream("b"));
    }

    #[test]
    fn test_parallel_links_collapse() {
        let connections =
            Connections::from_topology(&topology(&["a", "b"], &[("a", "b"), ("a", "b"), ("b", "a")]));
        assert_eq!(connections.degree("a"), 1);
        assert!(connections.has_link("a", "b"));
        assert!(!connections.has_link("b", "a"));
    }

    #[test]
    fn test_unknown_nodes_are_empty() {
        let connections = Connections::from_topology(&topology(&["a"], &[("a", "ghost")]));
        assert_eq!(connections.downstream("a").count(), 0);
        assert_eq!(connections.upstream("ghost").count(), 0);
        assert!(!connections.contains("ghost"));
        assert_eq!(connections.degree("ghost"), 0);
    }

    #[test]
    fn test_node_ids_are_sorted() {
        let connections = Connections::from_topology(&topology(&["spine1", "leaf2", "leaf1"], &[]));
        let ids: Vec<_> = connections.node_ids().collect();
        assert_eq!(ids, vec!["leaf1", "leaf2", "spine1"]);
    }

    #[test]
    fn test_back_edges_close_cycles() {
        let connections = Connections::from_topology(&topology(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        ));
        let back = connections.back_edges([&Id::new("a")]);
        assert_eq!(back.len(), 1);
        assert!(back.contains(&(Id::new("c"), Id::new("a"))));
    }

    #[test]
    fn test_back_edges_on_dag_is_empty() {
        let connections = Connections::from_topology(&topology(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        ));
        assert!(connections.back_edges([&Id::new("a")]).is_empty());
    }

    #[test]
    fn test_self_loop_is_back_edge() {
        let connections = Connections::from_topology(&topology(&["a"], &[("a", "a")]));
        let back = connections.back_edges([&Id::new("a")]);
        assert!(back.contains(&(Id::new("a"), Id::new("a"))));
    }
}
