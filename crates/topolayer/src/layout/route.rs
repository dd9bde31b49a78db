//! Attachment points of links on their endpoint boxes.
//!
//! A link attaches to each endpoint box at a fractional point: `(0, 0)` is the
//! top-left corner and `(1, 1)` the bottom-right one. One axis carries a 0/1
//! pair that picks the facing sides. The other axis carries a `step` that
//! spreads parallel links between the same pair of nodes across
//! `[0.25, 0.75]`.

use std::collections::BTreeMap;

use log::{debug, trace};
use serde::Serialize;

use topolayer_core::{
    geometry::Point,
    identifier::Id,
    orientation::Orientation,
    topology::Topology,
};

use super::model::{Positions, Ranking};
use crate::error::TopolayerError;

/// Fractional entry and exit points of one link.
///
/// `exit_*` applies to the source box, `entry_*` to the target box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyle {
    entry_x: f32,
    entry_y: f32,
    exit_x: f32,
    exit_y: f32,
}

impl LinkStyle {
    pub fn new(entry_x: f32, entry_y: f32, exit_x: f32, exit_y: f32) -> Self {
        Self {
            entry_x,
            entry_y,
            exit_x,
            exit_y,
        }
    }

    pub fn entry_x(&self) -> f32 {
        self.entry_x
    }

    pub fn entry_y(&self) -> f32 {
        self.entry_y
    }

    pub fn exit_x(&self) -> f32 {
        self.exit_x
    }

    pub fn exit_y(&self) -> f32 {
        self.exit_y
    }
}

/// Position of the `index`-th of `total` parallel links on the shared axis.
pub(crate) fn step(index: usize, total: usize) -> f32 {
    if total <= 1 {
        0.5
    } else {
        0.25 + 0.5 * index as f32 / (total - 1) as f32
    }
}

/// Routes one link between boxes at `source` and `target`.
pub(crate) fn route(
    source: Point,
    target: Point,
    same_rank: bool,
    orientation: Orientation,
    index: usize,
    total: usize,
) -> LinkStyle {
    let left_to_right = source.x() < target.x();
    let top_to_bottom = source.y() < target.y();
    let step = step(index, total);

    // Ranks stack along y when vertical; links between ranks face along that
    // axis, links within a rank along the other one.
    let faces_along_x = matches!(
        (orientation, same_rank),
        (Orientation::Vertical, true) | (Orientation::Horizontal, false)
    );

    if faces_along_x {
        let (entry_x, exit_x) = facing(left_to_right);
        LinkStyle::new(entry_x, step, exit_x, step)
    } else {
        let (entry_y, exit_y) = facing(top_to_bottom);
        LinkStyle::new(step, entry_y, step, exit_y)
    }
}

/// `(entry, exit)` fractions on the facing axis.
fn facing(forward: bool) -> (f32, f32) {
    if forward { (0.0, 1.0) } else { (1.0, 0.0) }
}

/// Routes every link of `topology`, in link order.
///
/// Parallel links are the links sharing an unordered endpoint pair; each one
/// gets its index among them in link order.
///
/// # Errors
///
/// Returns [`TopolayerError::Layout`] when an endpoint has no position or rank.
pub(crate) fn route_links(
    topology: &Topology,
    positions: &Positions,
    ranking: &Ranking,
    orientation: Orientation,
) -> Result<Vec<LinkStyle>, TopolayerError> {
    let mut totals: BTreeMap<(&Id, &Id), usize> = BTreeMap::new();
    for link in topology.links() {
        *totals.entry(link.endpoint_pair()).or_default() += 1;
    }

    let mut seen: BTreeMap<(&Id, &Id), usize> = BTreeMap::new();
    let mut styles = Vec::with_capacity(topology.link_count());
    for link in topology.links() {
        let pair = link.endpoint_pair();
        let index = seen.entry(pair).or_default();
        let total = totals.get(&pair).copied().unwrap_or(1);

        let (source, source_rank) = placement(link.source(), positions, ranking)?;
        let (target, target_rank) = placement(link.target(), positions, ranking)?;
        let style = route(
            source,
            target,
            source_rank == target_rank,
            orientation,
            *index,
            total,
        );
        trace!(link:% = link.key(), index = *index, total, style:?; "Routed link");

        *index += 1;
        styles.push(style);
    }

    debug!(links = styles.len(), parallel_pairs = totals.values().filter(|n| **n > 1).count(); "Links routed");
    Ok(styles)
}

fn placement(
    id: &Id,
    positions: &Positions,
    ranking: &Ranking,
) -> Result<(Point, usize), TopolayerError> {
    match (positions.get(id.as_str()), ranking.rank(id.as_str())) {
        (Some(position), Some(rank)) => Ok((position, rank)),
        _ => Err(TopolayerError::Layout(format!(
            "link endpoint `{id}` has no position"
        ))),
    }
}
