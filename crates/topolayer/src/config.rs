//! Configuration types for topolayer layouts.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from a
//! TOML file. Every field has a default, so a partial file (or none at all) is
//! valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Orientation and spacing of the base layout.
//! - [`AdjustConfig`] - Offsets used when nudging misleading placements.
//! - [`ConnectorConfig`] - Optional connector port expansion.
//! - [`TopologyConfig`] - How the input topology is filtered.
//!
//! # Example
//!
//! ```
//! # use topolayer::config::AppConfig;
//! # use topolayer::orientation::Orientation;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().orientation(), Orientation::Vertical);
//! assert_eq!(config.layout().padding(), 200.0);
//! assert!(!config.connectors().enabled());
//! ```

use serde::Deserialize;

use topolayer_core::orientation::Orientation;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Base layout section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Placement adjustment section.
    #[serde(default)]
    adjust: AdjustConfig,

    /// Connector expansion section.
    #[serde(default)]
    connectors: ConnectorConfig,

    /// Topology filtering section.
    #[serde(default)]
    topology: TopologyConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        adjust: AdjustConfig,
        connectors: ConnectorConfig,
        topology: TopologyConfig,
    ) -> Self {
        Self {
            layout,
            adjust,
            connectors,
            topology,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn adjust(&self) -> &AdjustConfig {
        &self.adjust
    }

    pub fn connectors(&self) -> &ConnectorConfig {
        &self.connectors
    }

    pub fn topology(&self) -> &TopologyConfig {
        &self.topology
    }

    /// Overrides the layout orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.layout.orientation = orientation;
        self
    }

    /// Turns connector expansion on or off.
    pub fn with_connectors(mut self, enabled: bool) -> Self {
        self.connectors.enabled = enabled;
        self
    }

    /// Keeps or drops nodes without links.
    pub fn with_include_unlinked_nodes(mut self, include: bool) -> Self {
        self.topology.include_unlinked_nodes = include;
        self
    }

    /// Checks that all sizes and spacings are usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("layout.padding", self.layout.padding),
            ("connectors.node_size", self.connectors.node_size),
            ("connectors.port_size", self.connectors.port_size),
            ("connectors.midpoint_size", self.connectors.midpoint_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("`{name}` must be a positive number, got {value}"));
            }
        }

        let finite = [
            ("layout.margin", self.layout.margin),
            ("adjust.single_offset", self.adjust.single_offset),
            ("adjust.pair_offset", self.adjust.pair_offset),
            ("adjust.same_rank_offset", self.adjust.same_rank_offset),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(format!("`{name}` must be a finite number, got {value}"));
            }
        }
        Ok(())
    }
}

/// Orientation and spacing of the base layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Direction in which ranks stack.
    orientation: Orientation,

    /// Distance between ranks and between neighbouring nodes of a rank.
    padding: f32,

    /// Minimum x and y of the normalized layout.
    margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            padding: 200.0,
            margin: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(orientation: Orientation, padding: f32, margin: f32) -> Self {
        Self {
            orientation,
            padding,
            margin,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }
}

/// Offsets applied by the intermediary adjustment passes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdjustConfig {
    /// Shift of a lone implicated node in the cross-rank pass.
    single_offset: f32,

    /// Shift of the outermost implicated nodes in the cross-rank pass.
    pair_offset: f32,

    /// Shift of an intermediary in the same-rank pass.
    same_rank_offset: f32,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            single_offset: 150.0,
            pair_offset: 100.0,
            same_rank_offset: 100.0,
        }
    }
}

impl AdjustConfig {
    /// Creates a new [`AdjustConfig`].
    pub fn new(single_offset: f32, pair_offset: f32, same_rank_offset: f32) -> Self {
        Self {
            single_offset,
            pair_offset,
            same_rank_offset,
        }
    }

    pub fn single_offset(&self) -> f32 {
        self.single_offset
    }

    pub fn pair_offset(&self) -> f32 {
        self.pair_offset
    }

    pub fn same_rank_offset(&self) -> f32 {
        self.same_rank_offset
    }
}

/// Connector port expansion.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    enabled: bool,

    /// Edge length of a (square) node box.
    node_size: f32,

    /// Edge length of a port box.
    port_size: f32,

    /// Edge length of a midpoint box.
    midpoint_size: f32,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            node_size: 75.0,
            port_size: 8.0,
            midpoint_size: 4.0,
        }
    }
}

impl ConnectorConfig {
    /// Creates a new [`ConnectorConfig`].
    pub fn new(enabled: bool, node_size: f32, port_size: f32, midpoint_size: f32) -> Self {
        Self {
            enabled,
            node_size,
            port_size,
            midpoint_size,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn node_size(&self) -> f32 {
        self.node_size
    }

    pub fn port_size(&self) -> f32 {
        self.port_size
    }

    pub fn midpoint_size(&self) -> f32 {
        self.midpoint_size
    }
}

/// Filtering applied to a parsed topology.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Keep nodes that take part in no link.
    include_unlinked_nodes: bool,
}

impl TopologyConfig {
    pub fn new(include_unlinked_nodes: bool) -> Self {
        Self {
            include_unlinked_nodes,
        }
    }

    pub fn include_unlinked_nodes(&self) -> bool {
        self.include_unlinked_nodes
    }
}
