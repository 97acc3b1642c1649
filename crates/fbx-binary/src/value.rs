//! In-memory FBX document tree.

/// A 64-bit integer stored as two 32-bit halves, exactly as it sits on the
/// wire (`low` first, then `high`).
///
/// Conversions to and from `i64`/`u64` are lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Long {
    pub low: u32,
    pub high: u32,
}

impl Long {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub const fn from_u64(v: u64) -> Self {
        Self {
            low: v as u32,
            high: (v >> 32) as u32,
        }
    }

    pub const fn from_i64(v: i64) -> Self {
        Self::from_u64(v as u64)
    }

    pub const fn to_u64(self) -> u64 {
        ((self.high as u64) << 32) | self.low as u64
    }

    pub const fn to_i64(self) -> i64 {
        self.to_u64() as i64
    }
}

impl From<i64> for Long {
    fn from(v: i64) -> Self {
        Long::from_i64(v)
    }
}

impl From<u64> for Long {
    fn from(v: u64) -> Self {
        Long::from_u64(v)
    }
}

impl From<Long> for i64 {
    fn from(v: Long) -> Self {
        v.to_i64()
    }
}

impl From<Long> for u64 {
    fn from(v: Long) -> Self {
        v.to_u64()
    }
}

/// A typed node property.
///
/// Strings (`S`) are kept as raw bytes: FBX embeds `\x00\x01` separators in
/// object names, and the encoder must write back exactly what was read.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// `Y`
    Short(i16),
    /// `C`
    Bool(bool),
    /// `I`
    Int(i32),
    /// `F`
    Float(f32),
    /// `D`
    Double(f64),
    /// `L`
    Long(Long),
    /// `i`
    IntArray(Vec<i32>),
    /// `f`
    FloatArray(Vec<f32>),
    /// `d`
    DoubleArray(Vec<f64>),
    /// `l`
    LongArray(Vec<Long>),
    /// `R`
    Raw(Vec<u8>),
    /// `S`
    String(Vec<u8>),
}

impl Property {
    /// Builds an `S` property from text.
    pub fn string(s: impl AsRef<str>) -> Self {
        Property::String(s.as_ref().as_bytes().to_vec())
    }

    /// The wire tag letter of this property.
    pub fn tag(&self) -> u8 {
        match self {
            Property::Short(_) => b'Y',
            Property::Bool(_) => b'C',
            Property::Int(_) => b'I',
            Property::Float(_) => b'F',
            Property::Double(_) => b'D',
            Property::Long(_) => b'L',
            Property::IntArray(_) => b'i',
            Property::FloatArray(_) => b'f',
            Property::DoubleArray(_) => b'd',
            Property::LongArray(_) => b'l',
            Property::Raw(_) => b'R',
            Property::String(_) => b'S',
        }
    }

    pub fn as_long(&self) -> Option<Long> {
        match self {
            Property::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text of an `S` property when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Property::String(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

/// A document tree node.
///
/// `None` and an empty list are distinct on purpose: a node decoded without
/// properties has `properties == None`, never `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub name: Vec<u8>,
    pub properties: Option<Vec<Property>>,
    pub children: Option<Vec<Node>>,
}

impl Node {
    pub fn new(name: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
            properties: None,
            children: None,
        }
    }

    /// Builder: appends a property.
    pub fn with_property(mut self, prop: Property) -> Self {
        self.properties.get_or_insert_with(Vec::new).push(prop);
        self
    }

    /// Builder: appends a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// The null sentinel: empty name, no properties, no children.
    pub fn is_null(&self) -> bool {
        self.name.is_empty() && self.properties.is_none() && self.children.is_none()
    }

    /// The name as text, when valid UTF-8.
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    pub fn properties(&self) -> &[Property] {
        self.properties.as_deref().unwrap_or(&[])
    }

    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name == name.as_bytes())
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children
            .as_mut()?
            .iter_mut()
            .find(|c| c.name == name.as_bytes())
    }
}

/// A decoded FBX file: its version and the top-level nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub version: u32,
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            children: Vec::new(),
        }
    }

    /// First top-level node with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name.as_bytes())
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name.as_bytes())
    }
}
