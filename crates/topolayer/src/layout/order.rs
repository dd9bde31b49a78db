//! Ordering of the nodes within one rank.
//!
//! Nodes with several neighbours in their own rank go to the middle, nodes with
//! a single such neighbour are split between both ends. When no node has more
//! than one neighbour in the rank, the input order is kept. Nodes without any
//! neighbour in the rank are left out of a reordered rank; the caller appends
//! them afterwards.

use std::collections::BTreeSet;

use log::trace;

use topolayer_core::identifier::Id;

use crate::graph::Connections;

/// Orders `nodes`, all of one rank.
pub(crate) fn order_rank(nodes: &[Id], connections: &Connections) -> Vec<Id> {
    let members: BTreeSet<&str> = nodes.iter().map(Id::as_str).collect();
    let same_rank_degree = |id: &Id| {
        connections
            .neighbors(id.as_str())
            .into_iter()
            .filter(|neighbor| members.contains(neighbor.as_str()))
            .count()
    };

    let degrees: Vec<(&Id, usize)> = nodes.iter().map(|id| (id, same_rank_degree(id))).collect();
    if degrees.iter().all(|(_, degree)| *degree <= 1) {
        return nodes.to_vec();
    }

    let mut multi: Vec<&Id> = degrees
        .iter()
        .filter(|(_, degree)| *degree > 1)
        .map(|(id, _)| *id)
        .collect();
    let mut single: Vec<&Id> = degrees
        .iter()
        .filter(|(_, degree)| *degree == 1)
        .map(|(id, _)| *id)
        .collect();

    multi.sort_by(|a, b| {
        connections
            .degree(b.as_str())
            .cmp(&connections.degree(a.as_str()))
            .then_with(|| a.cmp(b))
    });
    single.sort_by_key(|id| (connections.degree(id.as_str()), *id));

    let (head, tail) = single.split_at(single.len() / 2);
    let ordered: Vec<Id> = head
        .iter()
        .chain(&multi)
        .chain(tail)
        .map(|id| (*id).clone())
        .collect();

    trace!(
        nodes = nodes.len(),
        placed = ordered.len(),
        hubs = multi.len();
        "Reordered rank"
    );
    ordered
}
