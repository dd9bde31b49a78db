//! Correction of placements that suggest a connection that does not exist.
//!
//! Two single-shot passes run after centre alignment:
//!
//! - The cross-rank pass looks at links that skip at least one rank. Nodes on
//!   the skipped rank that sit exactly on the line of such a link are pushed
//!   sideways along the primary axis, so the long link does not appear to run
//!   through them.
//! - The same-rank pass looks for three consecutive nodes of a rank linked
//!   first to middle, middle to last and first to last. The middle one is
//!   pushed along the rank axis so the link between the outer two does not run
//!   through it.

use std::collections::BTreeMap;

use log::{debug, trace};

use topolayer_core::{geometry::Point, identifier::Id, orientation::Orientation};

use super::model::{Positions, RankGroups, Ranking};
use crate::{config::AdjustConfig, graph::Connections};

/// Runs the cross-rank and same-rank adjustment passes.
#[derive(Debug, Clone)]
pub(crate) struct IntermediaryAdjuster {
    orientation: Orientation,
    single_offset: f32,
    pair_offset: f32,
    same_rank_offset: f32,
}

impl IntermediaryAdjuster {
    pub(crate) fn new(orientation: Orientation, config: &AdjustConfig) -> Self {
        Self {
            orientation,
            single_offset: config.single_offset(),
            pair_offset: config.pair_offset(),
            same_rank_offset: config.same_rank_offset(),
        }
    }

    /// Cross-rank pass.
    pub(crate) fn adjust_cross_rank(
        &self,
        ranking: &Ranking,
        connections: &Connections,
        mut positions: Positions,
    ) -> Positions {
        let anchors = implicated_nodes(ranking, connections, &positions);

        let mut by_rank: BTreeMap<usize, Vec<&Id>> = BTreeMap::new();
        for id in anchors.keys() {
            if let Some(rank) = ranking.rank(id.as_str()) {
                by_rank.entry(rank).or_default().push(*id);
            }
        }

        // Most implicated nodes wins; the lowest rank wins a tie.
        let mut selected: Option<(usize, Vec<&Id>)> = None;
        for (rank, ids) in by_rank {
            if selected.as_ref().is_none_or(|(_, best)| ids.len() > best.len()) {
                selected = Some((rank, ids));
            }
        }
        let Some((rank, mut group)) = selected else {
            return positions;
        };

        let primary = |id: &Id, positions: &Positions| {
            positions
                .get(id.as_str())
                .map(|position| self.orientation.primary(position))
        };
        let aligned = |id: &Id, positions: &Positions| {
            primary(id, positions) == anchors.get(id).map(|anchor| self.orientation.primary(*anchor))
        };

        let mut moves: Vec<(&Id, f32)> = Vec::new();
        if let [only] = group.as_slice() {
            if aligned(*only, &positions) {
                moves.push((*only, -self.single_offset));
            }
        } else {
            group.sort_by(|a, b| {
                let pa = primary(*a, &positions).unwrap_or_default();
                let pb = primary(*b, &positions).unwrap_or_default();
                pa.total_cmp(&pb).then_with(|| a.cmp(b))
            });
            if let (Some(top), Some(bottom)) = (group.first(), group.last()) {
                if aligned(*top, &positions) {
                    moves.push((*top, -self.pair_offset));
                }
                if aligned(*bottom, &positions) {
                    moves.push((*bottom, self.pair_offset));
                }
            }
        }

        for (id, delta) in &moves {
            trace!(node:% = id, rank, delta = *delta; "Moving node off a skipped link");
            positions.update(id.as_str(), |position| {
                self.orientation.shift_primary(position, *delta)
            });
        }
        debug!(
            rank,
            implicated = group.len(),
            moved = moves.len();
            "Cross-rank adjustment done"
        );
        positions
    }

    /// Same-rank pass.
    pub(crate) fn adjust_same_rank(
        &self,
        groups: &RankGroups,
        connections: &Connections,
        mut positions: Positions,
    ) -> Positions {
        let delta = match self.orientation {
            Orientation::Vertical => self.same_rank_offset,
            Orientation::Horizontal => -self.same_rank_offset,
        };

        let mut moved = 0;
        for (rank, nodes) in groups {
            let mut placed: Vec<(&Id, f32)> = nodes
                .iter()
                .filter_map(|id| {
                    positions
                        .get(id.as_str())
                        .map(|position| (id, self.orientation.primary(position)))
                })
                .collect();
            placed.sort_by(|(a, pa), (b, pb)| pa.total_cmp(pb).then_with(|| a.cmp(b)));

            let intermediaries: Vec<&Id> = placed
                .windows(3)
                .filter_map(|window| match window {
                    [(prev, _), (current, _), (next, _)]
                        if connections.has_link(prev.as_str(), next.as_str())
                            && connections.has_link(prev.as_str(), current.as_str())
                            && connections.has_link(current.as_str(), next.as_str()) =>
                    {
                        Some(*current)
                    }
                    _ => None,
                })
                .collect();

            for id in intermediaries {
                trace!(node:% = id, rank = *rank; "Moving same-rank intermediary");
                positions.update(id.as_str(), |position| {
                    self.orientation.shift_secondary(position, delta)
                });
                moved += 1;
            }
        }

        debug!(moved; "Same-rank adjustment done");
        positions
    }
}

/// Collects the nodes implicated by rank-skipping links, each with the position
/// of the upstream node that implicated it. A later upstream overwrites an
/// earlier anchor.
fn implicated_nodes<'a>(
    ranking: &Ranking,
    connections: &'a Connections,
    positions: &Positions,
) -> BTreeMap<&'a Id, Point> {
    let mut anchors = BTreeMap::new();

    for node in connections.node_ids() {
        let Some(node_rank) = ranking.rank(node.as_str()) else {
            continue;
        };

        for upstream in connections.upstream(node.as_str()) {
            let (Some(upstream_rank), Some(anchor)) = (
                ranking.rank(upstream.as_str()),
                positions.get(upstream.as_str()),
            ) else {
                continue;
            };
            if node_rank.abs_diff(upstream_rank) < 2 {
                continue;
            }

            let between = if upstream_rank < node_rank {
                upstream_rank + 1
            } else {
                upstream_rank - 1
            };
            let at_between: Vec<&Id> = connections
                .downstream(upstream.as_str())
                .chain(connections.upstream(node.as_str()))
                .filter(|id| ranking.rank(id.as_str()) == Some(between))
                .collect();

            if !at_between.is_empty() {
                for id in at_between {
                    anchors.insert(id, anchor);
                }
            } else if connections.downstream(node.as_str()).any(|id| {
                ranking
                    .rank(id.as_str())
                    .is_some_and(|rank| rank.abs_diff(node_rank) >= 2)
            }) {
                anchors.insert(node, anchor);
            }
        }
    }

    anchors
}
