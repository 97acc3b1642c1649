//! FBX binary document encoder.

use fbx_buffers::Writer;

use crate::constants::{
    ENCODING_RAW, FOOTER, FOOTER_LEN, HEADER_LEN, MAGIC, MAGIC_TAIL, MAX_NAME_LEN, SENTINEL_LEN,
};
use crate::size::NodeSizes;
use crate::{Document, FbxError, Long, Node, Property};

/// FBX binary encoder.
///
/// Sizes every subtree first ([`NodeSizes`]) so each node's end offset can be
/// written up front, then writes the file in one forward pass. Arrays are
/// always written uncompressed.
pub struct FbxEncoder {
    pub writer: Writer,
}

impl Default for FbxEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FbxEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes a whole document: preamble, version, nodes, closing sentinel
    /// and footer.
    pub fn encode(&mut self, doc: &Document) -> Result<Vec<u8>, FbxError> {
        let sizes: Vec<NodeSizes> = doc.children.iter().map(NodeSizes::measure).collect();
        let expected = HEADER_LEN
            + sizes.iter().map(|s| s.total).sum::<usize>()
            + SENTINEL_LEN
            + FOOTER_LEN;
        check_offset(expected)?;

        self.writer = Writer::with_capacity(expected);
        self.writer.buf(MAGIC);
        self.writer.buf(&MAGIC_TAIL);
        self.writer.u32(doc.version);
        for (node, node_sizes) in doc.children.iter().zip(&sizes) {
            self.write_node(node, node_sizes)?;
        }
        self.write_sentinel();
        self.writer.buf(&FOOTER);

        let out = self.writer.flush();
        if out.len() != expected {
            return Err(FbxError::SerializationLengthMismatch {
                expected,
                actual: out.len(),
            });
        }
        tracing::debug!(
            version = doc.version,
            nodes = doc.children.len(),
            bytes = out.len(),
            "encoded FBX document"
        );
        Ok(out)
    }

    /// Encodes a single node record as if it started at offset 0.
    ///
    /// Useful for comparing subtrees byte-for-byte.
    pub fn encode_node(&mut self, node: &Node) -> Result<Vec<u8>, FbxError> {
        let sizes = NodeSizes::measure(node);
        check_offset(sizes.total)?;
        self.writer = Writer::with_capacity(sizes.total);
        self.write_node(node, &sizes)?;
        Ok(self.writer.flush())
    }

    /// Writes `node` at the writer's current position, which is taken to be
    /// its absolute offset in the file. Returns the number of bytes written.
    ///
    /// A nameless node with nothing in it reads back as the sentinel that ends
    /// its list, which would cut off every later sibling, so it is refused.
    fn write_node(&mut self, node: &Node, sizes: &NodeSizes) -> Result<usize, FbxError> {
        if node.name.is_empty() && node.properties().is_empty() && node.children().is_empty() {
            return Err(FbxError::NullNodeInList);
        }
        if node.name.len() > MAX_NAME_LEN {
            return Err(FbxError::NameTooLong {
                len: node.name.len(),
            });
        }

        let start = self.writer.len();
        let properties = node.properties();
        self.writer.u32((start + sizes.total) as u32);
        self.writer.u32(properties.len() as u32);
        self.writer.u32(sizes.properties as u32);
        self.writer.u8(node.name.len() as u8);
        self.writer.buf(&node.name);
        for prop in properties {
            self.write_property(prop);
        }
        for (child, child_sizes) in node.children().iter().zip(&sizes.children) {
            self.write_node(child, child_sizes)?;
        }

        let written = self.writer.len() - start;
        if written != sizes.total {
            return Err(FbxError::SerializationLengthMismatch {
                expected: sizes.total,
                actual: written,
            });
        }
        Ok(written)
    }

    fn write_sentinel(&mut self) {
        self.writer.zeros(SENTINEL_LEN);
    }

    /// Writes the tag byte and little-endian payload of one property.
    pub fn write_property(&mut self, prop: &Property) {
        self.writer.u8(prop.tag());
        match prop {
            Property::Short(v) => self.writer.i16(*v),
            Property::Bool(v) => self.writer.u8(u8::from(*v)),
            Property::Int(v) => self.writer.i32(*v),
            Property::Float(v) => self.writer.f32(*v),
            Property::Double(v) => self.writer.f64(*v),
            Property::Long(v) => self.write_long(*v),
            Property::IntArray(values) => {
                self.write_array_header(values.len(), 4);
                for v in values {
                    self.writer.i32(*v);
                }
            }
            Property::FloatArray(values) => {
                self.write_array_header(values.len(), 4);
                for v in values {
                    self.writer.f32(*v);
                }
            }
            Property::DoubleArray(values) => {
                self.write_array_header(values.len(), 8);
                for v in values {
                    self.writer.f64(*v);
                }
            }
            Property::LongArray(values) => {
                self.write_array_header(values.len(), 8);
                for v in values {
                    self.write_long(*v);
                }
            }
            Property::Raw(bytes) | Property::String(bytes) => {
                self.writer.u32(bytes.len() as u32);
                self.writer.buf(bytes);
            }
        }
    }

    fn write_long(&mut self, v: Long) {
        self.writer.u32(v.low);
        self.writer.u32(v.high);
    }

    fn write_array_header(&mut self, count: usize, width: usize) {
        self.writer.u32(count as u32);
        self.writer.u32(ENCODING_RAW);
        self.writer.u32((count * width) as u32);
    }
}

/// Encodes `doc` into a complete binary FBX file.
pub fn encode(doc: &Document) -> Result<Vec<u8>, FbxError> {
    FbxEncoder::new().encode(doc)
}

fn check_offset(size: usize) -> Result<(), FbxError> {
    if size > u32::MAX as usize {
        return Err(FbxError::DocumentTooLarge { size });
    }
    Ok(())
}
