//! Errors produced while loading a containerlab topology.

use thiserror::Error;

/// Error returned by [`crate::parse`].
///
/// Every variant that can be traced back to the source text carries a byte
/// offset, so callers can render a snippet around the offending location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The document is not valid YAML or does not have the containerlab shape.
    #[error("invalid topology file: {message}")]
    Yaml {
        message: String,
        offset: Option<usize>,
    },

    /// A link endpoint is not of the form `node:interface`.
    #[error("link #{link}: endpoint `{endpoint}` is not of the form `node:interface`")]
    Endpoint {
        link: usize,
        endpoint: String,
        offset: Option<usize>,
    },

    /// A link does not list exactly two endpoints.
    #[error("link #{link} has {count} endpoints, expected 2")]
    EndpointCount { link: usize, count: usize },
}

impl ParseError {
    /// Returns the byte offset of the error in the source, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Yaml { offset, .. } | Self::Endpoint { offset, .. } => *offset,
            Self::EndpointCount { .. } => None,
        }
    }

    /// Returns a hint on how to fix the error, if there is one.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::Yaml { .. } => {
                Some("a containerlab file needs a `topology` map with `nodes` and `links`")
            }
            Self::Endpoint { .. } => Some("write endpoints as `node:interface`, e.g. `leaf1:e1-1`"),
            Self::EndpointCount { .. } => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml {
            offset: err.location().map(|location| location.index()),
            message: err.to_string(),
        }
    }
}
