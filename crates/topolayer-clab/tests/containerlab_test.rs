//! Loading complete containerlab files.

use topolayer_clab::{LoadOptions, ParseError, parse};

const FABRIC: &str = r#"
name: fabric
mgmt:
  network: clab-mgmt
topology:
  kinds:
    nokia_srlinux:
      image: ghcr.io/nokia/srlinux
  nodes:
    dcgw1:
      kind: nokia_srlinux
      labels:
        graph-level: 0
        graph-icon: router
    spine1:
      kind: nokia_srlinux
      labels:
        graphlevel: "1"
    leaf1:
      kind: nokia_srlinux
    client1:
      kind: linux
    oob1:
      kind: linux
  links:
    - endpoints: ["dcgw1:e1-1", "spine1:e1-32"]
    - endpoints: ["spine1:e1-1", "leaf1:e1-49"]
    - endpoints:
        - node: leaf1
          interface: e1-1
        - node: client1
          interface: eth1
    - endpoints: ["leaf1:e1-2", "unknown1:eth1"]
    - type: host
"#;

#[test]
fn test_fabric() {
    let topology = parse(FABRIC, LoadOptions::default()).unwrap();

    let ids: Vec<_> = topology.nodes().map(|node| node.id().as_str()).collect();
    assert_eq!(ids, vec!["dcgw1", "spine1", "leaf1", "client1"]);

    let keys: Vec<_> = topology.links().iter().map(|link| link.key().to_string()).collect();
    assert_eq!(
        keys,
        vec![
            "dcgw1:e1-1:spine1:e1-32",
            "spine1:e1-1:leaf1:e1-49",
            "leaf1:e1-1:client1:eth1",
        ]
    );

    let dcgw = topology.node("dcgw1").unwrap();
    assert_eq!(dcgw.rank_hint(), Some(0));
    assert_eq!(dcgw.category(), Some("router"));
    assert_eq!(topology.node("spine1").unwrap().rank_hint(), Some(1));
    assert_eq!(topology.node("client1").unwrap().category(), Some("server"));
    assert!(topology.validate().is_ok());
}

#[test]
fn test_fabric_with_unlinked_nodes() {
    let options = LoadOptions::default().with_include_unlinked_nodes(true);
    let topology = parse(FABRIC, options).unwrap();

    assert!(topology.contains_node("oob1"));
    assert_eq!(topology.node("oob1").unwrap().category(), Some("default"));
    assert_eq!(topology.link_count(), 3);
}

#[test]
fn test_error_offset_points_into_source() {
    let source = "topology:\n  nodes:\n    a: {}\n  links:\n    - endpoints: [\"a-e1\", \"a:e2\"]\n";
    let err = parse(source, LoadOptions::default()).unwrap_err();

    assert!(matches!(err, ParseError::Endpoint { .. }));
    let offset = err.offset().unwrap();
    assert!(source[offset..].starts_with("a-e1"));
}
