//! Coordinates from ranks.
//!
//! Each rank is ordered, then laid out on a grid of `padding` spacing: the
//! index within the rank runs along the primary axis and the rank along the
//! secondary axis. The grid is then centre aligned rank by rank and finally
//! corrected by the intermediary passes.

use log::{debug, info};

use topolayer_core::{geometry::Point, orientation::Orientation};

use super::{
    align::center_align,
    intermediary::IntermediaryAdjuster,
    model::{Positions, RankGroups, Ranking},
    order::order_rank,
};
use crate::{config::AppConfig, graph::Connections};

/// Turns ranks and connectivity into node positions.
#[derive(Debug, Clone)]
pub(crate) struct PositionCalculator {
    orientation: Orientation,
    padding: f32,
    start: f32,
    adjuster: IntermediaryAdjuster,
}

impl PositionCalculator {
    pub(crate) fn new(config: &AppConfig) -> Self {
        let orientation = config.layout().orientation();
        Self {
            orientation,
            padding: config.layout().padding(),
            start: config.layout().margin(),
            adjuster: IntermediaryAdjuster::new(orientation, config.adjust()),
        }
    }

    /// Runs ordering, grid placement, centre alignment and both adjustment
    /// passes.
    pub(crate) fn compute(&self, ranking: &Ranking, connections: &Connections) -> Positions {
        let groups = ranking.groups();
        info!(ranks = groups.len(), nodes = ranking.len(); "Computing positions");

        let positions = self.initial_positions(&groups, connections);
        let positions = center_align(&groups, positions, self.orientation);
        let positions = self
            .adjuster
            .adjust_cross_rank(ranking, connections, positions);
        let positions = self
            .adjuster
            .adjust_same_rank(&groups, connections, positions);

        debug!(nodes = positions.len(); "Positions computed");
        positions
    }

    /// Grid placement of every rank.
    ///
    /// Nodes the orderer leaves out are appended after the ordered ones, in id
    /// order.
    pub(crate) fn initial_positions(&self, groups: &RankGroups, connections: &Connections) -> Positions {
        let mut positions = Positions::new();

        for (rank, nodes) in groups {
            let ordered = order_rank(nodes, connections);
            let placed = ordered.len();
            for (index, id) in ordered.into_iter().enumerate() {
                positions.insert(id, self.grid_point(index, *rank));
            }

            let missing: Vec<_> = nodes
                .iter()
                .filter(|id| !positions.contains(id.as_str()))
                .cloned()
                .collect();
            for (offset, id) in missing.into_iter().enumerate() {
                positions.insert(id, self.grid_point(placed + offset, *rank));
            }
        }

        positions
    }

    fn grid_point(&self, index: usize, rank: usize) -> Point {
        self.orientation.point(
            self.start + index as f32 * self.padding,
            self.start + rank as f32 * self.padding,
        )
    }
}

#[cfg(test)]
mod tests {
    use topolayer_core::identifier::Id;

    use super::*;
    use crate::{
        config::{AdjustConfig, ConnectorConfig, LayoutConfig, TopologyConfig},
        layout::{
            fixtures::{connections, topology},
            level::assign_levels,
        },
    };

    fn calculator(orientation: Orientation) -> PositionCalculator {
        PositionCalculator::new(&AppConfig::default().with_orientation(orientation))
    }

    #[test]
    fn test_grid_vertical_and_horizontal() {
        let topo = topology(&["a", "b", "c"], &[("a", "b"), ("a", "c")]);
        let connections = connections(&topo);
        let groups = assign_levels(&topo, &connections).groups();

        let vertical = calculator(Orientation::Vertical).initial_positions(&groups, &connections);
        assert_eq!(vertical.get("a"), Some(Point::new(100.0, 100.0)));
        assert_eq!(vertical.get("b"), Some(Point::new(100.0, 300.0)));
        assert_eq!(vertical.get("c"), Some(Point::new(300.0, 300.0)));

        let horizontal =
            calculator(Orientation::Horizontal).initial_positions(&groups, &connections);
        assert_eq!(horizontal.get("b"), Some(Point::new(300.0, 100.0)));
        assert_eq!(horizontal.get("c"), Some(Point::new(300.0, 300.0)));
    }

    #[test]
    fn test_nodes_left_out_by_orderer_are_appended() {
        // Rank 1 holds a same-rank star (hub, l1, l2) and a loner `aa`.
        let topo = topology(
            &["top", "aa", "hub", "l1", "l2"],
            &[
                ("top", "aa"),
                ("top", "hub"),
                ("top", "l1"),
                ("top", "l2"),
                ("hub", "l1"),
                ("l2", "hub"),
            ],
        );
        let connections = connections(&topo);
        // hub -> l1 would push l1 a rank down; pin the ranks instead.
        let ranking = Ranking::new(
            [("top", 0), ("aa", 1), ("hub", 1), ("l1", 1), ("l2", 1)]
                .into_iter()
                .map(|(id, rank)| (Id::new(id), rank))
                .collect(),
        );
        let positions =
            calculator(Orientation::Vertical).initial_positions(&ranking.groups(), &connections);

        assert_eq!(positions.get("l1").map(Point::x), Some(100.0));
        assert_eq!(positions.get("hub").map(Point::x), Some(300.0));
        assert_eq!(positions.get("l2").map(Point::x), Some(500.0));
        assert_eq!(positions.get("aa").map(Point::x), Some(700.0));
    }

    #[test]
    fn test_diamond_is_centred() {
        let topo = topology(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let connections = connections(&topo);
        let ranking = assign_levels(&topo, &connections);
        let positions = calculator(Orientation::Vertical).compute(&ranking, &connections);

        assert_eq!(positions.get("a"), Some(Point::new(100.0, 100.0)));
        assert_eq!(positions.get("b"), Some(Point::new(0.0, 300.0)));
        assert_eq!(positions.get("c"), Some(Point::new(200.0, 300.0)));
        assert_eq!(positions.get("d"), Some(Point::new(100.0, 500.0)));
    }

    #[test]
    fn test_custom_padding() {
        let config = AppConfig::new(
            LayoutConfig::new(Orientation::Vertical, 50.0, 10.0),
            AdjustConfig::default(),
            ConnectorConfig::default(),
            TopologyConfig::default(),
        );
        let topo = topology(&["a", "b"], &[("a", "b")]);
        let connections = connections(&topo);
        let groups = assign_levels(&topo, &connections).groups();
        let positions = PositionCalculator::new(&config).initial_positions(&groups, &connections);
        assert_eq!(positions.get("b"), Some(Point::new(10.0, 60.0)));
    }
}
