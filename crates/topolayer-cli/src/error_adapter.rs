//! Error adapter for converting TopolayerError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Parse errors that
//! know their byte offset in the topology file are rendered with a source
//! snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use topolayer::{ParseError, TopolayerError};

/// Adapter for a topology parse error.
pub struct ParseErrorAdapter<'a> {
    /// The wrapped parse error
    err: &'a ParseError,
    /// Source text for displaying snippets
    src: &'a str,
}

impl<'a> ParseErrorAdapter<'a> {
    /// Create a new parse error adapter.
    pub fn new(err: &'a ParseError, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Span from the error offset to the end of its line.
    fn span(&self) -> Option<SourceSpan> {
        let offset = self.err.offset()?.min(self.src.len());
        let rest = self.src.get(offset..)?;
        let len = rest.find('\n').unwrap_or(rest.len()).max(1).min(rest.len());
        Some(SourceSpan::new(offset.into(), len))
    }
}

impl fmt::Debug for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for ParseErrorAdapter<'_> {}

impl MietteDiagnostic for ParseErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            ParseError::Yaml { .. } => "topolayer::parse::yaml",
            ParseError::Endpoint { .. } => "topolayer::parse::endpoint",
            ParseError::EndpointCount { .. } => "topolayer::parse::endpoint_count",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.err
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        let message = match self.err {
            ParseError::Endpoint { .. } => "expected `node:interface`",
            _ => "here",
        };
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message.to_string()), span),
        )))
    }
}

/// Adapter for non-parse [`TopolayerError`] variants.
///
/// This adapter handles errors that don't have source information, such as
/// I/O errors, topology errors, layout errors, and export errors.
pub struct ErrorAdapter<'a>(pub &'a TopolayerError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TopolayerError::Io(_) => "topolayer::io",
            TopolayerError::Parse { .. } => return None,
            TopolayerError::Topology(_) => "topolayer::topology",
            TopolayerError::Layout(_) => "topolayer::layout",
            TopolayerError::Connector(_) => "topolayer::connector",
            TopolayerError::Export(_) => "topolayer::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            TopolayerError::Topology(_) => Some(Box::new(
                "every link endpoint must name a node of the topology",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a parse error with source text or any other error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error with source location information.
    Parse(ParseErrorAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`TopolayerError`] into a list of reportable errors.
///
/// Every error maps to exactly one [`Reportable`]; the list keeps the shape
/// the renderer in `main` iterates over.
pub fn to_reportables(err: &TopolayerError) -> Vec<Reportable<'_>> {
    match err {
        TopolayerError::Parse {
            err: parse_err,
            src,
        } => vec![Reportable::Parse(ParseErrorAdapter::new(parse_err, src))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use topolayer::topology::{Link, Node, Topology};

    use super::*;

    #[test]
    fn test_parse_error_with_offset() {
        let src = "topology:\n  links:\n    - endpoints: [leaf1, \"b:e1\"]\n";
        let offset = src.find("leaf1").unwrap();
        let err = TopolayerError::new_parse_error(
            ParseError::Endpoint {
                link: 0,
                endpoint: "leaf1".to_string(),
                offset: Some(offset),
            },
            src,
        );

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Parse(p) => {
                assert_eq!(
                    p.to_string(),
                    "link #0: endpoint `leaf1` is not of the form `node:interface`"
                );
                let labels: Vec<_> = p.labels().unwrap().collect();
                assert_eq!(labels.len(), 1);
                assert_eq!(labels[0].offset(), offset);
                assert_eq!(labels[0].label(), Some("expected `node:interface`"));
                assert!(labels[0].primary());
                assert!(p.help().is_some());
            }
            Reportable::Error(_) => panic!("Expected Parse"),
        }
    }

    #[test]
    fn test_parse_error_without_offset() {
        let err = TopolayerError::new_parse_error(
            ParseError::EndpointCount { link: 3, count: 1 },
            "topology: {}",
        );

        let reportables = to_reportables(&err);
        assert!(reportables[0].labels().is_none());
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("topolayer::parse::endpoint_count".to_string())
        );
    }

    #[test]
    fn test_offset_at_end_of_source() {
        let err = ParseError::Yaml {
            message: "unexpected end".to_string(),
            offset: Some(4),
        };
        let adapter = ParseErrorAdapter::new(&err, "a: [");
        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 4);
        assert_eq!(labels[0].len(), 0);
    }

    #[test]
    fn test_non_parse_error() {
        let err = TopolayerError::Layout("layout error".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Layout error: layout error");
                assert_eq!(
                    e.code().map(|c| c.to_string()),
                    Some("topolayer::layout".to_string())
                );
            }
            Reportable::Parse(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_topology_error_has_help() {
        let topology = Topology::new()
            .with_node(Node::new("a"))
            .with_link(Link::new("a", "e1", "ghost", "e1"));
        let err = TopolayerError::from(topology.validate().unwrap_err());
        let reportables = to_reportables(&err);
        assert!(reportables[0].help().is_some());
    }
}
