//! Layered layout of topologies.
//!
//! This module turns a [`Topology`](topolayer_core::topology::Topology) into
//! positioned nodes and routed links. Nodes are ranked along the direction of
//! their links, ranks are stacked along the secondary axis, and nodes of one
//! rank are spread along the primary axis.
//!
//! # Pipeline Position
//!
//! ```text
//! Topology
//!     ↓ level       ranks
//!     ↓ position    order, grid, centre alignment, adjustment
//!     ↓ normalize   minimum x / y at the margin
//!     ↓ route       entry / exit fractions per link
//!     ↓ connector   ports and midpoints (optional)
//! Layout
//!     ↓ export
//! JSON
//! ```
//!
//! # Submodules
//!
//! - `level` - Rank assignment with hint floors and cycle guards
//! - `order` - Order of the nodes within a rank
//! - `align` - Centre alignment of consecutive ranks
//! - `intermediary` - Cross-rank and same-rank adjustment passes
//! - `position` - Grid placement driving the three stages above
//! - `route` - Link attachment points
//! - [`connector`] - Connector port expansion
//!
//! # Re-exports
//!
//! - [`Engine`] - Runs the whole pipeline
//! - [`Layout`], [`NodeLayout`], [`LinkLayout`], [`LinkStyle`] - Output types

mod align;
pub mod connector;
mod engine;
mod intermediary;
mod level;
mod model;
mod order;
mod position;
mod result;
mod route;

#[cfg(test)]
mod fixtures;

pub use engine::Engine;
pub use model::{Positions, RankGroups, Ranking};
pub use result::{Layout, LinkLayout, NodeLayout};
pub use route::LinkStyle;
