//! Connector port expansion.
//!
//! Every link is split into two directional ports, one on each endpoint box,
//! and a midpoint between them. Ports sit on the side of the box the router
//! picked for the link and are spread evenly along that side. Ports of a node
//! are grouped with the node.
//!
//! Ids are derived from the link endpoints:
//!
//! | element       | id                                  |
//! |---------------|-------------------------------------|
//! | source port   | `source:source_intf:target:target_intf` |
//! | target port   | `target:target_intf:source:source_intf` |
//! | midpoint      | `mid:<link key>`                    |
//! | source link   | `<source port>-src`                 |
//! | target link   | `<target port>-trgt`                |
//! | group         | `group-<node>`                      |

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};
use serde::Serialize;

use topolayer_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    topology::{Link, LinkKey},
};

use super::{model::Positions, route::LinkStyle};
use crate::{config::ConnectorConfig, error::TopolayerError};

/// Side of a node box a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Up,
    Right,
    Down,
    Left,
}

impl PortDirection {
    /// Reads a direction from the fractional attachment point of a link.
    fn from_fractions(x: f32, y: f32) -> Option<Self> {
        if y == 0.0 {
            Some(Self::Up)
        } else if y == 1.0 {
            Some(Self::Down)
        } else if x == 0.0 {
            Some(Self::Left)
        } else if x == 1.0 {
            Some(Self::Right)
        } else {
            None
        }
    }

    fn of_source(style: &LinkStyle) -> Option<Self> {
        Self::from_fractions(style.exit_x(), style.exit_y())
    }

    fn of_target(style: &LinkStyle) -> Option<Self> {
        Self::from_fractions(style.entry_x(), style.entry_y())
    }
}

/// One end of a link on the boundary of its node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorPort {
    id: String,
    node: Id,
    link: LinkKey,
    interface: String,
    label: String,
    direction: PortDirection,
    position: Point,
    size: Size,
}

impl ConnectorPort {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node(&self) -> &Id {
        &self.node
    }

    pub fn link(&self) -> &LinkKey {
        &self.link
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Short label shown next to the port.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    /// Top-left corner of the port box.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }

    fn center(&self) -> Point {
        self.position.add_point(self.size.half())
    }
}

/// Element between the two ports of a link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Midpoint {
    id: String,
    link: LinkKey,
    position: Point,
    size: Size,
}

impl Midpoint {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn link(&self) -> &LinkKey {
        &self.link
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Segment from a port to its link's midpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorLink {
    id: String,
    source: String,
    target: String,
}

impl ConnectorLink {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// A node together with all of its ports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortGroup {
    id: String,
    node: Id,
    members: Vec<String>,
    bounds: Bounds,
}

impl PortGroup {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node(&self) -> &Id {
        &self.node
    }

    /// Port ids in link order, followed by the node id.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Output of the connector expansion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectorLayout {
    ports: Vec<ConnectorPort>,
    midpoints: Vec<Midpoint>,
    links: Vec<ConnectorLink>,
    groups: Vec<PortGroup>,
    misaligned_links: Vec<LinkKey>,
}

impl ConnectorLayout {
    /// Source and target port of every link, in link order.
    pub fn ports(&self) -> &[ConnectorPort] {
        &self.ports
    }

    pub fn midpoints(&self) -> &[Midpoint] {
        &self.midpoints
    }

    pub fn links(&self) -> &[ConnectorLink] {
        &self.links
    }

    /// One group per node with ports, in id order.
    pub fn groups(&self) -> &[PortGroup] {
        &self.groups
    }

    /// Links between aligned nodes whose ports ended up off the line
    /// joining them.
    pub fn misaligned_links(&self) -> &[LinkKey] {
        &self.misaligned_links
    }

    pub fn port(&self, id: &str) -> Option<&ConnectorPort> {
        self.ports.iter().find(|port| port.id == id)
    }
}

/// Allocates connector ports on node boxes.
#[derive(Debug, Clone)]
pub(crate) struct ConnectorPortAllocator {
    node_size: f32,
    port_size: f32,
    midpoint_size: f32,
}

impl ConnectorPortAllocator {
    pub(crate) fn new(config: &ConnectorConfig) -> Self {
        Self {
            node_size: config.node_size(),
            port_size: config.port_size(),
            midpoint_size: config.midpoint_size(),
        }
    }

    /// Expands `links` into ports, midpoints and groups.
    ///
    /// `styles` holds the routed style of every link, in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`TopolayerError::Connector`] when a style has no readable
    /// direction, a node has no position, or a side runs out of slots.
    pub(crate) fn allocate(
        &self,
        links: &[Link],
        styles: &[LinkStyle],
        positions: &Positions,
    ) -> Result<ConnectorLayout, TopolayerError> {
        if links.len() != styles.len() {
            return Err(TopolayerError::Connector(format!(
                "{} links but {} styles",
                links.len(),
                styles.len()
            )));
        }

        let mut sides: Vec<(PortDirection, PortDirection)> = Vec::with_capacity(links.len());
        for (link, style) in links.iter().zip(styles) {
            let source = PortDirection::of_source(style);
            let target = PortDirection::of_target(style);
            let (Some(source), Some(target)) = (source, target) else {
                return Err(TopolayerError::Connector(format!(
                    "link `{}` has no port direction",
                    link.key()
                )));
            };
            sides.push((source, target));
        }

        let mut counts: BTreeMap<(&Id, PortDirection), usize> = BTreeMap::new();
        for (link, (source, target)) in links.iter().zip(&sides) {
            *counts.entry((link.source(), *source)).or_default() += 1;
            *counts.entry((link.target(), *target)).or_default() += 1;
        }

        let mut slots: BTreeMap<(&Id, PortDirection), VecDeque<Point>> = BTreeMap::new();
        for ((node, direction), count) in &counts {
            let origin = node_position(node, positions)?;
            let side = (0..*count)
                .map(|n| origin.add_point(self.slot_offset(*direction, n, *count)))
                .collect();
            slots.insert((*node, *direction), side);
        }

        let mut layout = ConnectorLayout::default();
        let mut groups: BTreeMap<&Id, (Vec<String>, Bounds)> = BTreeMap::new();

        for (link, (source_side, target_side)) in links.iter().zip(&sides) {
            let key = link.key();
            let source = self.take_port(
                &mut slots,
                link,
                link.source(),
                link.source_intf(),
                *source_side,
                format!(
                    "{}:{}:{}:{}",
                    link.source(),
                    link.source_intf(),
                    link.target(),
                    link.target_intf()
                ),
            )?;
            let target = self.take_port(
                &mut slots,
                link,
                link.target(),
                link.target_intf(),
                *target_side,
                format!(
                    "{}:{}:{}:{}",
                    link.target(),
                    link.target_intf(),
                    link.source(),
                    link.source_intf()
                ),
            )?;

            let midpoint_size = Size::square(self.midpoint_size);
            let midpoint = Midpoint {
                id: format!("mid:{key}"),
                link: key.clone(),
                position: source
                    .center()
                    .midpoint(target.center())
                    .sub_point(midpoint_size.half()),
                size: midpoint_size,
            };

            if self.is_misaligned(link, &source, &target, positions) {
                debug!(link:% = key; "Connector ports are not aligned with their nodes");
                layout.misaligned_links.push(key.clone());
            }

            for (node, port) in [(link.source(), &source), (link.target(), &target)] {
                let node_box =
                    node_position(node, positions)?.to_bounds(Size::square(self.node_size));
                let (members, bounds) = groups
                    .entry(node)
                    .or_insert_with(|| (Vec::new(), node_box));
                members.push(port.id.clone());
                *bounds = bounds.merge(&port.bounds());
            }

            layout.links.push(ConnectorLink {
                id: format!("{}-src", source.id),
                source: source.id.clone(),
                target: midpoint.id.clone(),
            });
            layout.links.push(ConnectorLink {
                id: format!("{}-trgt", target.id),
                source: target.id.clone(),
                target: midpoint.id.clone(),
            });
            trace!(link:% = key, source:? = source.direction, target:? = target.direction; "Allocated connector ports");

            layout.ports.push(source);
            layout.ports.push(target);
            layout.midpoints.push(midpoint);
        }

        layout.groups = groups
            .into_iter()
            .map(|(node, (mut members, bounds))| {
                members.push(node.to_string());
                PortGroup {
                    id: format!("group-{node}"),
                    node: node.clone(),
                    members,
                    bounds,
                }
            })
            .collect();

        debug!(
            ports = layout.ports.len(),
            groups = layout.groups.len(),
            misaligned = layout.misaligned_links.len();
            "Connector ports allocated"
        );
        Ok(layout)
    }

    /// Offset of the `n`-th of `count` port boxes from the node's top-left
    /// corner. Port boxes are centred on the node edge.
    fn slot_offset(&self, direction: PortDirection, n: usize, count: usize) -> Point {
        let spacing = self.node_size / (count + 1) as f32;
        let along = spacing * (n + 1) as f32 - self.port_size / 2.0;
        let near = -self.port_size / 2.0;
        let far = self.node_size - self.port_size / 2.0;
        match direction {
            PortDirection::Up => Point::new(along, near),
            PortDirection::Down => Point::new(along, far),
            PortDirection::Left => Point::new(near, along),
            PortDirection::Right => Point::new(far, along),
        }
    }

    fn take_port<'a>(
        &self,
        slots: &mut BTreeMap<(&'a Id, PortDirection), VecDeque<Point>>,
        link: &Link,
        node: &'a Id,
        interface: &str,
        direction: PortDirection,
        id: String,
    ) -> Result<ConnectorPort, TopolayerError> {
        let position = slots
            .get_mut(&(node, direction))
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| {
                TopolayerError::Connector(format!(
                    "no {direction:?} slot left on `{node}` for link `{}`",
                    link.key()
                ))
            })?;

        Ok(ConnectorPort {
            id,
            node: node.clone(),
            link: link.key(),
            interface: interface.to_string(),
            label: interface_label(interface),
            direction,
            position,
            size: Size::square(self.port_size),
        })
    }

    /// A link between nodes on one horizontal (vertical) line should keep its
    /// ports on one horizontal (vertical) line too.
    fn is_misaligned(
        &self,
        link: &Link,
        source: &ConnectorPort,
        target: &ConnectorPort,
        positions: &Positions,
    ) -> bool {
        let (Some(from), Some(to)) = (
            positions.get(link.source().as_str()),
            positions.get(link.target().as_str()),
        ) else {
            return false;
        };

        if from.y() == to.y() {
            source.position.y() != target.position.y()
        } else if from.x() == to.x() {
            source.position.x() != target.position.x()
        } else {
            false
        }
    }
}

fn node_position(node: &Id, positions: &Positions) -> Result<Point, TopolayerError> {
    positions
        .get(node.as_str())
        .ok_or_else(|| TopolayerError::Connector(format!("node `{node}` has no position")))
}

/// Last run of digits in an interface name, or the whole name without digits.
///
/// ```text
/// e1-49    -> 49
/// eth0     -> 0
/// mgmt     -> mgmt
/// ```
pub(crate) fn interface_label(name: &str) -> String {
    let Some(end) = name.rfind(|c: char| c.is_ascii_digit()) else {
        return name.to_string();
    };
    let start = name[..=end]
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(0, |(i, c)| i + c.len_utf8());
    name[start..=end].to_string()
}
