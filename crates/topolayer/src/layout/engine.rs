//! The layered layout engine.

use log::{debug, info};

use topolayer_core::{geometry::Size, topology::Topology};

use super::{
    connector::ConnectorPortAllocator,
    level::assign_levels,
    position::PositionCalculator,
    result::{Layout, LinkLayout, NodeLayout},
    route::route_links,
};
use crate::{config::AppConfig, error::TopolayerError, graph::Connections};

/// Border added around the node extent to size the canvas.
const CANVAS_BORDER: f32 = 150.0;

/// Layered layout engine for topologies.
///
/// Runs ranking, positioning, normalization, link routing and, when enabled,
/// connector expansion.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: AppConfig,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lays out `topology`.
    ///
    /// The topology is expected to be valid: every link endpoint names a node.
    ///
    /// # Errors
    ///
    /// Returns [`TopolayerError::Layout`] when a link refers to a node without
    /// a position, and [`TopolayerError::Connector`] when connector expansion
    /// fails.
    pub fn calculate(&self, topology: &Topology) -> Result<Layout, TopolayerError> {
        let orientation = self.config.layout().orientation();
        info!(
            nodes = topology.node_count(),
            links = topology.link_count(),
            orientation:%;
            "Calculating layout"
        );

        let connections = Connections::from_topology(topology);
        let ranking = assign_levels(topology, &connections);

        let positions = PositionCalculator::new(&self.config)
            .compute(&ranking, &connections)
            .normalized(self.config.layout().margin());

        let styles = route_links(topology, &positions, &ranking, orientation)?;

        let connectors = if self.config.connectors().enabled() {
            info!(links = topology.link_count(); "Expanding connector ports");
            let allocator = ConnectorPortAllocator::new(self.config.connectors());
            Some(allocator.allocate(topology.links(), &styles, &positions)?)
        } else {
            None
        };

        let node_size = Size::square(self.config.connectors().node_size());
        let mut nodes = Vec::with_capacity(ranking.len());
        for id in ranking.ordered() {
            let (Some(rank), Some(position)) = (ranking.rank(id.as_str()), positions.get(id.as_str()))
            else {
                return Err(TopolayerError::Layout(format!("node `{id}` was not placed")));
            };
            let category = topology
                .node(id.as_str())
                .and_then(|node| node.category())
                .map(str::to_string);
            nodes.push(NodeLayout::new(id.clone(), rank, position, node_size, category));
        }

        let links = topology
            .links()
            .iter()
            .zip(styles)
            .map(|(link, style)| {
                LinkLayout::new(
                    link.key(),
                    link.source().clone(),
                    link.source_intf().to_string(),
                    link.target().clone(),
                    link.target_intf().to_string(),
                    style,
                )
            })
            .collect();

        let canvas = positions.canvas_size(CANVAS_BORDER);
        debug!(
            width = canvas.width(),
            height = canvas.height(),
            max_rank:? = ranking.max_rank();
            "Layout calculated"
        );

        Ok(Layout::new(orientation, canvas, nodes, links, connectors))
    }
}

#[cfg(test)]
mod tests {
    use topolayer_core::{geometry::Point, orientation::Orientation};

    use super::*;
    use crate::layout::fixtures::topology;

    #[test]
    fn test_single_link_vertical() {
        let layout = Engine::default()
            .calculate(&topology(&["a", "b"], &[("a", "b")]))
            .unwrap();

        let a = layout.node("a").unwrap();
        let b = layout.node("b").unwrap();
        assert_eq!((a.rank(), b.rank()), (0, 1));
        assert_eq!(a.position(), Point::new(100.0, 100.0));
        assert_eq!(b.position(), Point::new(100.0, 300.0));

        let style = layout.link("a:e0:b:e0").unwrap().style();
        assert_eq!((style.entry_y(), style.exit_y()), (0.0, 1.0));
        assert_eq!(layout.canvas(), Size::new(300.0, 500.0));
        assert!(layout.connectors().is_none());
    }

    #[test]
    fn test_horizontal_swaps_axes() {
        let engine = Engine::new(AppConfig::default().with_orientation(Orientation::Horizontal));
        let layout = engine.calculate(&topology(&["a", "b"], &[("a", "b")])).unwrap();

        assert_eq!(layout.node("b").unwrap().position(), Point::new(300.0, 100.0));
        let style = layout.link("a:e0:b:e0").unwrap().style();
        assert_eq!((style.entry_x(), style.exit_x()), (0.0, 1.0));
    }

    #[test]
    fn test_nodes_sorted_by_rank_then_id() {
        let layout = Engine::default()
            .calculate(&topology(
                &["z", "b", "a"],
                &[("z", "b"), ("z", "a")],
            ))
            .unwrap();
        let ids: Vec<_> = layout.nodes().iter().map(|node| node.id().as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "b"]);
    }

    #[test]
    fn test_connectors_enabled() {
        let engine = Engine::new(AppConfig::default().with_connectors(true));
        let layout = engine.calculate(&topology(&["a", "b"], &[("a", "b")])).unwrap();

        let connectors = layout.connectors().unwrap();
        assert_eq!(connectors.ports().len(), 2);
        assert_eq!(connectors.midpoints().len(), 1);
        assert_eq!(connectors.groups().len(), 2);
    }

    #[test]
    fn test_empty_topology() {
        let layout = Engine::default().calculate(&Topology::new()).unwrap();
        assert!(layout.is_empty());
        assert!(layout.links().is_empty());
        assert_eq!(layout.canvas(), Size::new(300.0, 300.0));
    }
}
