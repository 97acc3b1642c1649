//! Exact serialized sizes of document subtrees.
//!
//! Every node record starts with the absolute offset at which it ends, so the
//! encoder has to know a subtree's size before writing its first byte. These
//! functions compute those sizes; [`NodeSizes`] caches them as a tree that the
//! encoder walks alongside the document.

use crate::constants::{ARRAY_HEADER_LEN, FOOTER_LEN, HEADER_LEN, NODE_HEADER_LEN, SENTINEL_LEN};
use crate::{Document, Node, Property};

/// Byte width of one element of an array property with the given tag.
///
/// Only the array types the value model carries have a width; `y` and `c`
/// arrays are recognised on the wire but not supported.
pub fn element_width(tag: u8) -> Option<usize> {
    match tag {
        b'i' | b'f' => Some(4),
        b'd' | b'l' => Some(8),
        _ => None,
    }
}

/// Serialized size of one property, tag byte included.
pub fn property_size(prop: &Property) -> usize {
    match prop {
        Property::Short(_) => 1 + 2,
        Property::Bool(_) => 1 + 1,
        Property::Int(_) | Property::Float(_) => 1 + 4,
        Property::Double(_) | Property::Long(_) => 1 + 8,
        Property::Raw(bytes) | Property::String(bytes) => 1 + 4 + bytes.len(),
        Property::IntArray(v) => ARRAY_HEADER_LEN + v.len() * 4,
        Property::FloatArray(v) => ARRAY_HEADER_LEN + v.len() * 4,
        Property::DoubleArray(v) => ARRAY_HEADER_LEN + v.len() * 8,
        Property::LongArray(v) => ARRAY_HEADER_LEN + v.len() * 8,
    }
}

/// Serialized size of a property list (the node header's third field).
pub fn property_list_size(props: &[Property]) -> usize {
    props.iter().map(property_size).sum()
}

/// Serialized size of a node and its whole subtree.
///
/// Child sentinels are not counted: the encoder does not write one after a
/// child list. A null node on its own measures [`SENTINEL_LEN`].
pub fn node_size(node: &Node) -> usize {
    NODE_HEADER_LEN
        + node.name.len()
        + property_list_size(node.properties())
        + node.children().iter().map(node_size).sum::<usize>()
}

/// Serialized size of a whole file: header, nodes, closing sentinel, footer.
pub fn document_size(doc: &Document) -> usize {
    HEADER_LEN + doc.children.iter().map(node_size).sum::<usize>() + SENTINEL_LEN + FOOTER_LEN
}

/// Precomputed sizes for a node subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSizes {
    /// Whole subtree, header included.
    pub total: usize,
    /// Property list only.
    pub properties: usize,
    /// One entry per child, in order.
    pub children: Vec<NodeSizes>,
}

impl NodeSizes {
    /// Measures `node` and its descendants in a single pass.
    pub fn measure(node: &Node) -> Self {
        let properties = property_list_size(node.properties());
        let children: Vec<NodeSizes> = node.children().iter().map(NodeSizes::measure).collect();
        let total = NODE_HEADER_LEN
            + node.name.len()
            + properties
            + children.iter().map(|c| c.total).sum::<usize>();
        Self {
            total,
            properties,
            children,
        }
    }
}
