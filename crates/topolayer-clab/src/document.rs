//! Raw serde model of a containerlab topology file.
//!
//! Only the parts that matter for layout are modelled. Unknown keys (`kind`,
//! `image`, `mgmt`, ...) are ignored.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::ParseError;

#[derive(Debug, Deserialize)]
pub(crate) struct ClabFile {
    #[serde(default)]
    pub name: Option<String>,
    pub topology: TopologySection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopologySection {
    #[serde(default)]
    pub nodes: Option<IndexMap<String, Option<NodeBody>>>,
    #[serde(default)]
    pub links: Option<Vec<LinkBody>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NodeBody {
    #[serde(default)]
    pub labels: Option<IndexMap<String, Value>>,
}

impl NodeBody {
    fn label(&self, key: &str) -> Option<&Value> {
        self.labels.as_ref().and_then(|labels| labels.get(key))
    }

    /// Rank hint from `graph-level`, falling back to `graphlevel`.
    pub fn rank_hint(&self) -> Option<usize> {
        self.label("graph-level")
            .and_then(rank_value)
            .or_else(|| self.label("graphlevel").and_then(rank_value))
    }

    /// Value of the `graph-icon` label.
    pub fn icon(&self) -> Option<&str> {
        self.label("graph-icon").and_then(Value::as_str)
    }
}

/// Accepts non-negative integers and integer strings.
fn rank_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LinkBody {
    #[serde(default)]
    pub endpoints: Option<Vec<RawEndpoint>>,
}

/// A link endpoint, either `"node:intf"` or `{ node, interface }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawEndpoint {
    Short(String),
    Extended { node: String, interface: String },
}

impl RawEndpoint {
    /// Splits the endpoint into node name and interface name.
    ///
    /// `source` and `search_from` are only used to locate the endpoint for
    /// error reporting.
    pub fn into_parts(
        self,
        link: usize,
        source: &str,
        search_from: usize,
    ) -> Result<(String, String), ParseError> {
        match self {
            Self::Extended { node, interface } => Ok((node, interface)),
            Self::Short(endpoint) => match endpoint.split_once(':') {
                Some((node, intf)) if !node.is_empty() => Ok((node.to_string(), intf.to_string())),
                _ => Err(ParseError::Endpoint {
                    link,
                    offset: source
                        .get(search_from..)
                        .and_then(|rest| rest.find(endpoint.as_str()))
                        .map(|pos| pos + search_from),
                    endpoint,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(yaml: &str) -> NodeBody {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_rank_hint_accepts_int_and_string() {
        assert_eq!(body("labels: {graph-level: 2}").rank_hint(), Some(2));
        assert_eq!(body("labels: {graph-level: '3'}").rank_hint(), Some(3));
        assert_eq!(body("labels: {graphlevel: 4}").rank_hint(), Some(4));
    }

    #[test]
    fn test_rank_hint_prefers_dashed_label() {
        let node = body("labels: {graph-level: 1, graphlevel: 7}");
        assert_eq!(node.rank_hint(), Some(1));
    }

    #[test]
    fn test_rank_hint_ignores_invalid_values() {
        assert_eq!(body("labels: {graph-level: -1}").rank_hint(), None);
        assert_eq!(body("labels: {graph-level: top}").rank_hint(), None);
        assert_eq!(body("labels: {graph-level: -1, graphlevel: 2}").rank_hint(), Some(2));
        assert_eq!(body("kind: linux").rank_hint(), None);
    }

    #[test]
    fn test_icon_label() {
        assert_eq!(body("labels: {graph-icon: router}").icon(), Some("router"));
        assert_eq!(NodeBody::default().icon(), None);
    }

    #[test]
    fn test_endpoint_parts() {
        let short = RawEndpoint::Short("leaf1:e1-1".to_string());
        assert_eq!(
            short.into_parts(0, "", 0).unwrap(),
            ("leaf1".to_string(), "e1-1".to_string())
        );

        let extended = RawEndpoint::Extended {
            node: "srl".to_string(),
            interface: "ethernet-1/1".to_string(),
        };
        assert_eq!(
            extended.into_parts(0, "", 0).unwrap(),
            ("srl".to_string(), "ethernet-1/1".to_string())
        );
    }

    #[test]
    fn test_endpoint_without_colon_is_located() {
        let source = "nodes: {leaf1: {}}\nlinks:\n  - endpoints: [leaf1, x:y]\n";
        let from = source.find("links:").unwrap();
        let err = RawEndpoint::Short("leaf1".to_string())
            .into_parts(0, source, from)
            .unwrap_err();
        assert_eq!(err.offset(), source.rfind("leaf1"));
    }
}
