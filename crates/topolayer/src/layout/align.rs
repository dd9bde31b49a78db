//! Centre alignment of consecutive ranks.
//!
//! The first rank seeds a reference with the midpoint of its extent along the
//! primary axis. Every later rank is shifted so its mean lands on the
//! reference, and its mean after the shift becomes the next reference.

use log::trace;

use topolayer_core::orientation::Orientation;

use super::model::{Positions, RankGroups};

/// Shifts each rank along the primary axis to centre it under its predecessor.
pub(crate) fn center_align(
    groups: &RankGroups,
    mut positions: Positions,
    orientation: Orientation,
) -> Positions {
    let mut reference: Option<f32> = None;

    for (rank, nodes) in groups {
        let coords: Vec<f32> = nodes
            .iter()
            .filter_map(|id| positions.get(id.as_str()))
            .map(|position| orientation.primary(position))
            .collect();
        if coords.is_empty() {
            continue;
        }

        let Some(target) = reference else {
            let min = coords.iter().copied().fold(f32::INFINITY, f32::min);
            let max = coords.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            reference = Some((min + max) / 2.0);
            continue;
        };

        let offset = target - mean(&coords);
        for id in nodes {
            positions.update(id.as_str(), |position| orientation.shift_primary(position, offset));
        }
        trace!(rank = *rank, offset; "Centred rank");

        let shifted: Vec<f32> = nodes
            .iter()
            .filter_map(|id| positions.get(id.as_str()))
            .map(|position| orientation.primary(position))
            .collect();
        reference = Some(mean(&shifted));
    }

    positions
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}
