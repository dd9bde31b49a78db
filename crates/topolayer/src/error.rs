//! Error types for topolayer operations.
//!
//! This module provides the main error type [`TopolayerError`] which wraps
//! the error conditions that can occur while loading and laying out a
//! topology.

use std::io;

use thiserror::Error;

use topolayer_clab::ParseError;
use topolayer_core::topology::TopologyError;

/// The main error type for topolayer operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the error, so callers
/// can render a snippet around the reported offset.
#[derive(Debug, Error)]
pub enum TopolayerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("Layout error: {0}")]
    Layout(String),

    /// Connector port allocation ran out of slots.
    ///
    /// This is an internal invariant violation, not a user error.
    #[error("Connector error: {0}")]
    Connector(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for TopolayerError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TopolayerError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
