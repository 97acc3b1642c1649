//! The `Connections` section: `C` records linking object ids.
//!
//! A record looks like `C: "OO", <from id>, <to id>` or, for links to a named
//! property, `C: "OP", <from id>, <to id>, "<property>"`.

use std::collections::{HashMap, HashSet};

use fbx_binary::{FbxEncoder, Long, Node, Property};

const RECORD: &[u8] = b"C";

/// One parsed connection record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Connection {
    pub kind: Vec<u8>,
    pub from: Long,
    pub to: Long,
    /// Encoded properties after the two ids (the property name of `OP`).
    pub extra: Vec<u8>,
}

/// A connection seen from one of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) struct Link {
    pub outgoing: bool,
    pub kind: Vec<u8>,
    pub counterpart: Long,
    pub extra: Vec<u8>,
}

fn endpoints(node: &Node) -> Option<(&[u8], Long, Long)> {
    if node.name != RECORD {
        return None;
    }
    match node.properties() {
        [Property::String(kind), Property::Long(from), Property::Long(to), ..] => {
            Some((kind.as_slice(), *from, *to))
        }
        _ => None,
    }
}

pub(super) fn parse(node: &Node) -> Option<Connection> {
    let (kind, from, to) = endpoints(node)?;
    let mut encoder = FbxEncoder::new();
    for prop in &node.properties()[3..] {
        encoder.write_property(prop);
    }
    Some(Connection {
        kind: kind.to_vec(),
        from,
        to,
        extra: encoder.writer.flush(),
    })
}

/// All well-formed connection records under a `Connections` node.
pub(super) fn collect(section: &Node) -> Vec<Connection> {
    section.children().iter().filter_map(parse).collect()
}

/// Every link touching `id`, sorted so that the list can be compared as a
/// whole. A record connecting `id` to itself contributes two links.
pub(super) fn links_of(connections: &[Connection], id: Long) -> Vec<Link> {
    let mut links = Vec::new();
    for conn in connections {
        if conn.from == id {
            links.push(Link {
                outgoing: true,
                kind: conn.kind.clone(),
                counterpart: conn.to,
                extra: conn.extra.clone(),
            });
        }
        if conn.to == id {
            links.push(Link {
                outgoing: false,
                kind: conn.kind.clone(),
                counterpart: conn.from,
                extra: conn.extra.clone(),
            });
        }
    }
    links.sort();
    links
}

/// Points both endpoints of every record at the surviving object.
pub(super) fn rewrite_ids(section: &mut Node, remap: &HashMap<Long, Long>) {
    let Some(records) = section.children.as_mut() else {
        return;
    };
    for record in records.iter_mut() {
        if endpoints(record).is_none() {
            continue;
        }
        if let Some(props) = record.properties.as_mut() {
            for prop in &mut props[1..3] {
                if let Property::Long(id) = prop {
                    if let Some(survivor) = remap.get(&*id) {
                        *id = *survivor;
                    }
                }
            }
        }
    }
}

/// Removes connection records that are byte-identical to an earlier one.
/// Returns how many were removed.
pub(super) fn drop_duplicates(section: &mut Node) -> usize {
    let Some(records) = section.children.as_mut() else {
        return 0;
    };
    let mut encoder = FbxEncoder::new();
    let mut seen = HashSet::new();
    let before = records.len();
    records.retain(|record| {
        if endpoints(record).is_none() {
            return true;
        }
        match encoder.encode_node(record) {
            Ok(bytes) => seen.insert(bytes),
            Err(_) => true,
        }
    });
    let removed = before - records.len();
    if records.is_empty() {
        section.children = None;
    }
    removed
}
