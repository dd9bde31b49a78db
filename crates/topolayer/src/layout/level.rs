//! Rank assignment.
//!
//! Ranks grow along link direction. Seeds are the nodes without a hint and
//! without upstream neighbours (rank 0) followed by the hinted nodes (rank =
//! hint). From the seeds, ranks are relaxed forward over a worklist: a node is
//! raised to `parent + 1` when that is higher than its current rank, and only a
//! raised node propagates further. A hint is a floor, never a fixed value.
//!
//! Edges that close a cycle (found by a depth-first search from the seeds) are
//! not followed, and every rank is capped at `max(seed rank) + node count`, so
//! relaxation terminates on any input. Nodes that no seed reaches are grouped
//! by the alphabetic prefix of their id and every group gets its own rank after
//! the highest one assigned so far.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use indexmap::IndexMap;
use log::{debug, trace};

use topolayer_core::{identifier::Id, topology::Topology};

use super::model::Ranking;
use crate::graph::Connections;

/// Assigns a rank to every node of `topology`.
pub(crate) fn assign_levels(topology: &Topology, connections: &Connections) -> Ranking {
    let hints: BTreeMap<&Id, usize> = topology
        .nodes()
        .filter_map(|node| node.rank_hint().map(|hint| (node.id(), hint)))
        .collect();

    let roots = connections
        .node_ids()
        .filter(|id| !hints.contains_key(id) && !connections.has_upstream(id.as_str()));
    let seeds: Vec<(&Id, usize)> = roots
        .map(|id| (id, 0))
        .chain(hints.iter().map(|(id, hint)| (*id, *hint)))
        .collect();

    let cycle_edges = connections.back_edges(seeds.iter().map(|(id, _)| *id));
    let cycle_edges: BTreeSet<(&Id, &Id)> = cycle_edges.iter().map(|(s, t)| (s, t)).collect();

    let ceiling = seeds
        .iter()
        .map(|(_, rank)| *rank)
        .max()
        .unwrap_or(0)
        .saturating_add(connections.node_count());

    let mut ranks: BTreeMap<Id, usize> = BTreeMap::new();
    let mut worklist: VecDeque<(&Id, usize)> = seeds.iter().copied().collect();
    while let Some((id, proposed)) = worklist.pop_front() {
        let floor = hints.get(id).copied().unwrap_or(0);
        let rank = proposed.max(floor).min(ceiling);
        if ranks.get(id).is_some_and(|current| *current >= rank) {
            continue;
        }

        trace!(node:% = id, rank; "Raising rank");
        ranks.insert(id.clone(), rank);
        for next in connections.downstream(id.as_str()) {
            if !cycle_edges.contains(&(id, next)) {
                worklist.push_back((next, rank + 1));
            }
        }
    }
    let propagated = ranks.len();

    // Unreached nodes (isolated, or on a cycle without entry): one rank per prefix.
    let mut prefix_groups: IndexMap<&str, Vec<&Id>> = IndexMap::new();
    for id in connections.node_ids().filter(|id| !ranks.contains_key(*id)) {
        prefix_groups.entry(id.alpha_prefix()).or_default().push(id);
    }
    let mut next_rank = ranks.values().max().map_or(0, |max| max + 1);
    for (prefix, ids) in prefix_groups {
        trace!(prefix, rank = next_rank, nodes = ids.len(); "Ranking unreached nodes by prefix");
        for id in ids {
            ranks.insert(id.clone(), next_rank);
        }
        next_rank += 1;
    }

    let ranking = Ranking::new(ranks);
    debug!(
        nodes = ranking.len(),
        propagated,
        max_rank:? = ranking.max_rank();
        "Ranks assigned"
    );
    ranking
}
