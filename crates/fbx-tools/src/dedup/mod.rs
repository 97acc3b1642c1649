//! Merging of duplicate objects.
//!
//! Exporters commonly write one `Material` per mesh that uses it, and some
//! write the same `Model` more than once. These passes keep the first copy,
//! delete the rest from `Objects` and repoint `Connections` at the survivor.
//!
//! Objects are compared by their encoded bytes with the leading id property
//! left out. Models additionally have to be attached to the same things: two
//! identical meshes parented to different nodes stay separate.

mod connections;

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use fbx_binary::{Document, FbxEncoder, Long, Node, Property};

use connections::Link;

const OBJECTS: &str = "Objects";
const CONNECTIONS: &str = "Connections";
const MATERIAL: &[u8] = b"Material";
const MODEL: &[u8] = b"Model";

/// Outcome of a dedup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    /// `(removed id, surviving id)` pairs in the order they were merged.
    pub merged: Vec<(Long, Long)>,
    /// Connection records dropped because they became duplicates.
    pub connections_removed: usize,
}

impl DedupReport {
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty() && self.connections_removed == 0
    }

    fn absorb(&mut self, other: DedupReport) {
        self.merged.extend(other.merged);
        self.connections_removed += other.connections_removed;
    }
}

/// Merges `Material` objects with identical content.
pub fn dedup_materials(doc: &mut Document) -> DedupReport {
    dedup_class(doc, MATERIAL, false)
}

/// Merges `Model` objects with identical content and identical connections.
///
/// Repeats until a pass merges nothing, since rewriting connections changes
/// the neighbourhood of the objects that remain.
pub fn dedup_objects(doc: &mut Document) -> DedupReport {
    dedup_class(doc, MODEL, true)
}

fn dedup_class(doc: &mut Document, class: &[u8], with_links: bool) -> DedupReport {
    let mut report = DedupReport::default();
    loop {
        let pass = merge_pass(doc, class, with_links);
        if pass.merged.is_empty() {
            break;
        }
        report.absorb(pass);
    }
    tracing::debug!(
        class = %String::from_utf8_lossy(class),
        merged = report.merged.len(),
        connections_removed = report.connections_removed,
        "dedup finished"
    );
    report
}

/// The first property, when it is an `L` id.
pub fn object_id(node: &Node) -> Option<Long> {
    node.properties().first().and_then(Property::as_long)
}

/// Encoded form of `node` without its id property.
fn content_signature(encoder: &mut FbxEncoder, node: &Node) -> Option<Vec<u8>> {
    let mut anonymous = node.clone();
    if let Some(props) = anonymous.properties.as_mut() {
        props.remove(0);
    }
    encoder.encode_node(&anonymous).ok()
}

/// Ids carried by more than one object. Those objects are never merged since
/// their connections cannot be told apart.
fn shared_ids(objects: &Node) -> HashSet<Long> {
    let mut seen = HashSet::new();
    let mut shared = HashSet::new();
    for id in objects.children().iter().filter_map(object_id) {
        if !seen.insert(id) {
            shared.insert(id);
        }
    }
    shared
}

fn merge_pass(doc: &mut Document, class: &[u8], with_links: bool) -> DedupReport {
    let records = doc
        .child(CONNECTIONS)
        .map(connections::collect)
        .unwrap_or_default();
    let Some(objects) = doc.child(OBJECTS) else {
        return DedupReport::default();
    };

    let shared = shared_ids(objects);
    let mut encoder = FbxEncoder::new();
    let mut survivors: HashMap<(Vec<u8>, Vec<Link>), Long> = HashMap::new();
    let mut remap = HashMap::new();
    let mut removed = HashSet::new();
    let mut report = DedupReport::default();

    for (index, node) in objects.children().iter().enumerate() {
        if node.name != class {
            continue;
        }
        let Some(id) = object_id(node) else {
            continue;
        };
        if shared.contains(&id) {
            continue;
        }
        let Some(content) = content_signature(&mut encoder, node) else {
            continue;
        };
        let links = if with_links {
            connections::links_of(&records, id)
        } else {
            Vec::new()
        };
        match survivors.entry((content, links)) {
            Entry::Occupied(entry) => {
                let survivor = *entry.get();
                tracing::debug!(
                    class = %String::from_utf8_lossy(class),
                    removed = id.to_i64(),
                    survivor = survivor.to_i64(),
                    "merging duplicate object"
                );
                remap.insert(id, survivor);
                removed.insert(index);
                report.merged.push((id, survivor));
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }
    }

    if report.merged.is_empty() {
        return report;
    }

    if let Some(objects) = doc.child_mut(OBJECTS) {
        remove_indices(objects, &removed);
    }
    if let Some(section) = doc.child_mut(CONNECTIONS) {
        connections::rewrite_ids(section, &remap);
        report.connections_removed = connections::drop_duplicates(section);
    }
    report
}

fn remove_indices(parent: &mut Node, removed: &HashSet<usize>) {
    let Some(children) = parent.children.as_mut() else {
        return;
    };
    let mut index = 0;
    children.retain(|_| {
        let keep = !removed.contains(&index);
        index += 1;
        keep
    });
    if children.is_empty() {
        parent.children = None;
    }
}
