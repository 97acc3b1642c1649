//! Binary FBX ("Kaydara FBX Binary") document codec.
//!
//! - [`decode`] / [`FbxDecoder`] turn a complete file into a [`Document`] tree.
//! - [`encode`] / [`FbxEncoder`] turn a [`Document`] back into bytes.
//!
//! Compressed array properties are inflated through an injected [`Inflate`]
//! capability. With the default `zlib` feature the decoder uses
//! [`ZlibInflate`](inflate::ZlibInflate); without it, compressed arrays are
//! rejected unless a capability is passed to [`FbxDecoder::with_inflate`].
//! The encoder always writes arrays uncompressed.
//!
//! # Example
//!
//! ```
//! use fbx_binary::{decode, encode, Document, Node, Property};
//!
//! let mut doc = Document::new(7400);
//! doc.children.push(Node::new("Root").with_property(Property::Int(42)));
//!
//! let bytes = encode(&doc).unwrap();
//! assert_eq!(bytes.len(), 222);
//! assert_eq!(decode(&bytes).unwrap(), doc);
//! ```

pub mod constants;
pub mod decoder;
pub mod encoder;
mod error;
pub mod inflate;
pub mod size;
mod value;

pub use decoder::{decode, decode_with, FbxDecoder};
pub use encoder::{encode, FbxEncoder};
pub use error::FbxError;
pub use inflate::{Inflate, InflateError, NoInflate};
pub use value::{Document, Long, Node, Property};

#[cfg(feature = "zlib")]
pub use inflate::ZlibInflate;
