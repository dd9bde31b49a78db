//! Export of computed layouts.
//!
//! # Pipeline Position
//!
//! ```text
//! Topology
//!     ↓ layout
//! Layout
//!     ↓ export (this module)
//! JSON
//! ```
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`TopolayerError::Export`] at the crate boundary.
//!
//! [`TopolayerError::Export`]: crate::TopolayerError::Export

use std::io::Write;

use thiserror::Error;

use crate::layout::Layout;

/// Abstraction for layout export backends.
pub trait Exporter {
    /// Exports `layout` to the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the layout cannot be encoded or written.
    fn export_layout(&mut self, layout: &Layout) -> Result<(), Error>;
}

/// Errors that can occur during layout export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes layouts as pretty-printed JSON.
///
/// Field order follows the layout types and all collections are ordered, so
/// identical layouts produce identical bytes.
pub struct JsonExporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for JsonExporter<W> {
    fn export_layout(&mut self, layout: &Layout) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut self.writer, layout)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
