//! FBX binary document decoder.
//!
//! Recursive descent over a forward-only [`Reader`]. Sibling lists at every
//! level end with a null sentinel node, which is consumed here and never
//! surfaces in the returned tree.

use fbx_buffers::Reader;

use crate::constants::{
    DEFAULT_MAX_DEPTH, ENCODING_DEFLATE, ENCODING_RAW, HEADER_LEN, MAGIC, MAGIC_TAIL, MAX_VERSION,
    NODE_HEADER_LEN, PREAMBLE_LEN,
};
use crate::inflate::{DefaultInflate, Inflate};
use crate::size::element_width;
use crate::{Document, FbxError, Long, Node, Property};

/// FBX binary decoder.
///
/// Holds the decompression capability used for compressed array properties
/// and the nesting limit. Decoding never mutates the decoder, so one instance
/// can be shared across calls.
///
/// ```
/// use fbx_binary::{FbxDecoder, FbxError};
///
/// let decoder = FbxDecoder::new().max_depth(64);
/// assert_eq!(decoder.decode(b"not fbx"), Err(FbxError::NotFbxFormat));
/// ```
#[derive(Debug, Clone)]
pub struct FbxDecoder<I = DefaultInflate> {
    inflate: I,
    max_depth: usize,
}

impl Default for FbxDecoder<DefaultInflate> {
    fn default() -> Self {
        Self::new()
    }
}

impl FbxDecoder<DefaultInflate> {
    pub fn new() -> Self {
        Self::with_inflate(DefaultInflate::default())
    }
}

impl<I: Inflate> FbxDecoder<I> {
    /// Creates a decoder that inflates compressed arrays with `inflate`.
    pub fn with_inflate(inflate: I) -> Self {
        Self {
            inflate,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the deepest node nesting accepted before failing with
    /// [`FbxError::NestingTooDeep`]. Top-level nodes are at depth 1.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decodes a complete binary FBX file.
    pub fn decode(&self, data: &[u8]) -> Result<Document, FbxError> {
        let mut reader = Reader::new(data);
        check_magic(&mut reader)?;

        let version = reader.u32()?;
        if version > MAX_VERSION {
            return Err(FbxError::UnsupportedVersion {
                version,
                max: MAX_VERSION,
            });
        }

        let mut offset = HEADER_LEN;
        let mut children = Vec::new();
        while !reader.is_empty() {
            let (node, bytes) = self.read_node(&mut reader, offset, 1)?;
            offset += bytes;
            if node.is_null() {
                break;
            }
            children.push(node);
        }

        tracing::debug!(
            version,
            nodes = children.len(),
            bytes = data.len(),
            "decoded FBX document"
        );
        Ok(Document { version, children })
    }

    /// Reads one node record starting at absolute offset `start` and returns it
    /// along with the number of bytes it accounts for.
    ///
    /// The declared property list length is trusted: it is added to the byte
    /// count as-is rather than compared with what the property reads consumed.
    fn read_node(
        &self,
        reader: &mut Reader<'_>,
        start: usize,
        depth: usize,
    ) -> Result<(Node, usize), FbxError> {
        let end_offset = reader.u32()? as usize;
        let num_properties = reader.u32()?;
        let property_list_len = reader.u32()? as usize;
        let name_len = reader.u8()? as usize;

        // The sentinel closing the deepest allowed list sits one level below it.
        if depth > self.max_depth {
            let is_null = name_len == 0
                && num_properties == 0
                && start + NODE_HEADER_LEN + property_list_len >= end_offset;
            if !is_null {
                return Err(FbxError::NestingTooDeep {
                    limit: self.max_depth,
                });
            }
        }

        let name = reader.buf(name_len)?.to_vec();
        let mut bytes = NODE_HEADER_LEN + name_len;

        let mut node = Node {
            name,
            properties: None,
            children: None,
        };

        if num_properties > 0 {
            let mut properties = Vec::new();
            for _ in 0..num_properties {
                properties.push(self.read_property(reader)?);
            }
            node.properties = Some(properties);
        }
        bytes += property_list_len;

        while start + bytes < end_offset {
            let (child, child_bytes) = self.read_node(reader, start + bytes, depth + 1)?;
            bytes += child_bytes;
            if child.is_null() {
                break;
            }
            node.children.get_or_insert_with(Vec::new).push(child);
        }

        tracing::trace!(
            offset = start,
            name = %String::from_utf8_lossy(&node.name),
            bytes,
            "decoded node"
        );
        Ok((node, bytes))
    }

    fn read_property(&self, reader: &mut Reader<'_>) -> Result<Property, FbxError> {
        let tag = reader.u8()?;
        let prop = match tag {
            b'S' => {
                let len = reader.u32()? as usize;
                Property::String(reader.buf(len)?.to_vec())
            }
            b'R' => {
                let len = reader.u32()? as usize;
                Property::Raw(reader.buf(len)?.to_vec())
            }
            b'Y' => Property::Short(reader.i16()?),
            b'C' => Property::Bool(reader.u8()? != 0),
            b'I' => Property::Int(reader.i32()?),
            b'F' => Property::Float(reader.f32()?),
            b'D' => Property::Double(reader.f64()?),
            b'L' => Property::Long(read_long(reader)?),
            b'y' | b'c' | b'i' | b'f' | b'd' | b'l' => self.read_array(reader, tag)?,
            _ => return Err(FbxError::UnknownPropertyType(tag)),
        };
        Ok(prop)
    }

    fn read_array(&self, reader: &mut Reader<'_>, tag: u8) -> Result<Property, FbxError> {
        let count = reader.u32()? as usize;
        let encoding = reader.u32()?;
        let payload_len = reader.u32()? as usize;
        let width = element_width(tag).ok_or(FbxError::UnknownArrayType(tag))?;

        match encoding {
            ENCODING_RAW => read_elements(reader, tag, count),
            ENCODING_DEFLATE => {
                let payload = reader.buf(payload_len)?;
                let expected = count.saturating_mul(width);
                let inflated = self
                    .inflate
                    .inflate(payload, expected)
                    .map_err(|err| FbxError::Inflate(err.to_string()))?;
                if inflated.len() != expected {
                    return Err(FbxError::DecompressedLengthMismatch {
                        expected,
                        actual: inflated.len(),
                    });
                }
                read_elements(&mut Reader::new(&inflated), tag, count)
            }
            other => Err(FbxError::UnknownEncoding(other)),
        }
    }
}

/// Decodes `data` with the default decompressor.
pub fn decode(data: &[u8]) -> Result<Document, FbxError> {
    FbxDecoder::new().decode(data)
}

/// Decodes `data`, inflating compressed arrays with `inflate`.
pub fn decode_with<I: Inflate>(data: &[u8], inflate: I) -> Result<Document, FbxError> {
    FbxDecoder::with_inflate(inflate).decode(data)
}

fn check_magic(reader: &mut Reader<'_>) -> Result<(), FbxError> {
    let preamble = reader
        .buf(PREAMBLE_LEN)
        .map_err(|_| FbxError::NotFbxFormat)?;
    let (magic, tail) = preamble.split_at(MAGIC.len());
    if magic != MAGIC || tail != MAGIC_TAIL {
        return Err(FbxError::NotFbxFormat);
    }
    Ok(())
}

fn read_long(reader: &mut Reader<'_>) -> Result<Long, FbxError> {
    let low = reader.u32()?;
    let high = reader.u32()?;
    Ok(Long { low, high })
}

fn read_elements(reader: &mut Reader<'_>, tag: u8, count: usize) -> Result<Property, FbxError> {
    let width = element_width(tag).ok_or(FbxError::UnknownArrayType(tag))?;
    // Check up front so a bogus count cannot trigger a huge allocation.
    let wanted = count.saturating_mul(width);
    if wanted > reader.size() {
        return Err(FbxError::OutOfBounds {
            offset: reader.x(),
            wanted,
        });
    }

    let prop = match tag {
        b'i' => Property::IntArray((0..count).map(|_| reader.i32()).collect::<Result<_, _>>()?),
        b'f' => Property::FloatArray((0..count).map(|_| reader.f32()).collect::<Result<_, _>>()?),
        b'd' => Property::DoubleArray((0..count).map(|_| reader.f64()).collect::<Result<_, _>>()?),
        b'l' => Property::LongArray(
            (0..count)
                .map(|_| read_long(reader))
                .collect::<Result<_, _>>()?,
        ),
        _ => return Err(FbxError::UnknownArrayType(tag)),
    };
    Ok(prop)
}
