//! Topolayer Core Types and Definitions
//!
//! This crate provides the foundational types shared by the topolayer crates.
//! It includes:
//!
//! - **Identifiers**: Ordered node identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Orientation**: Layout direction and axis helpers ([`orientation::Orientation`])
//! - **Topology**: The node table and link list handed to the layout engine
//!   ([`topology`] module)

pub mod geometry;
pub mod identifier;
pub mod orientation;
pub mod topology;
