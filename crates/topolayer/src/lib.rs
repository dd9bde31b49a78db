//! Topolayer - Deterministic layered layout for network topologies.
//!
//! Loading, layout, and export of containerlab topologies. Nodes are ranked
//! along their links, placed on a grid, aligned and adjusted, and every link
//! gets the points where it attaches to its endpoint boxes.

pub mod config;
pub mod layout;

mod error;
mod export;
mod graph;

pub use topolayer_clab::ParseError;
pub use topolayer_core::{geometry, identifier, orientation, topology};

pub use error::TopolayerError;
pub use export::{Exporter, JsonExporter};

use log::{debug, info, trace};

use topolayer_clab::LoadOptions;
use topolayer_core::topology::Topology;

use config::AppConfig;
use layout::{Engine, Layout};

/// Builder for loading and laying out topologies.
///
/// # Examples
///
/// ```rust
/// use topolayer::{LayoutBuilder, config::AppConfig};
///
/// let source = r#"
/// name: lab
/// topology:
///   nodes:
///     spine1: {}
///     leaf1: {}
///   links:
///     - endpoints: ["spine1:e1-1", "leaf1:e1-49"]
/// "#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let topology = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&topology).expect("Failed to lay out");
///
/// assert_eq!(layout.node("spine1").unwrap().rank(), 0);
/// assert_eq!(layout.node("leaf1").unwrap().rank(), 1);
///
/// let json = builder.render_json(&layout).expect("Failed to render");
/// assert!(json.contains("\"entryY\""));
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a containerlab topology file.
    ///
    /// Links to unknown nodes are dropped. Nodes without links are dropped
    /// unless `topology.include_unlinked_nodes` is set.
    ///
    /// # Errors
    ///
    /// Returns [`TopolayerError::Parse`] for malformed YAML or endpoints. The
    /// error keeps `source` for diagnostics.
    pub fn parse(&self, source: &str) -> Result<Topology, TopolayerError> {
        info!("Parsing topology");

        let options = LoadOptions::default()
            .with_include_unlinked_nodes(self.config.topology().include_unlinked_nodes());
        let topology = topolayer_clab::parse(source, options)
            .map_err(|err| TopolayerError::new_parse_error(err, source))?;

        debug!(
            nodes = topology.node_count(),
            links = topology.link_count();
            "Topology parsed successfully"
        );
        trace!(topology:?; "Parsed topology");

        Ok(topology)
    }

    /// Lay out a topology.
    ///
    /// # Errors
    ///
    /// Returns [`TopolayerError::Layout`] for an unusable configuration,
    /// [`TopolayerError::Topology`] when a link refers to an unknown node, and
    /// [`TopolayerError::Connector`] when connector expansion fails.
    pub fn layout(&self, topology: &Topology) -> Result<Layout, TopolayerError> {
        self.config.validate().map_err(TopolayerError::Layout)?;
        topology.validate()?;

        let layout = Engine::new(self.config.clone()).calculate(topology)?;
        info!(nodes = layout.nodes().len(), links = layout.links().len(); "Layout calculated");
        Ok(layout)
    }

    /// Render a layout as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TopolayerError::Export`] if encoding fails.
    pub fn render_json(&self, layout: &Layout) -> Result<String, TopolayerError> {
        let mut exporter = JsonExporter::new(Vec::new());
        exporter.export_layout(layout)?;
        let json = String::from_utf8(exporter.into_inner())
            .map_err(|err| TopolayerError::Export(Box::new(err)))?;

        info!(bytes = json.len(); "JSON rendered successfully");
        Ok(json)
    }
}
