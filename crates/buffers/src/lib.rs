//! Little-endian binary buffer utilities for the FBX codec.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with a forward-only cursor
//! - [`Writer`] - Writes binary data to an append-only buffer
//!
//! Every multi-byte quantity is little-endian, which is what the FBX binary
//! format uses throughout.
//!
//! # Example
//!
//! ```
//! use fbx_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u32(0x0203_0405);
//! writer.buf(b"hello");
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u32().unwrap(), 0x0203_0405);
//! assert_eq!(reader.buf(5).unwrap(), b"hello");
//! assert!(reader.u8().is_err());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer {
        /// Absolute cursor position at which the read was attempted.
        offset: usize,
        /// Number of bytes the read needed.
        wanted: usize,
    },
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer { offset, wanted } => {
                write!(f, "end of buffer: wanted {} bytes at offset {}", wanted, offset)
            }
        }
    }
}

impl std::error::Error for BufferError {}
