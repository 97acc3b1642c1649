//! FBX codec error type.

use fbx_buffers::BufferError;
use thiserror::Error;

/// Error type for FBX binary decoding and encoding.
///
/// Every decode error aborts the whole document; there is no partial result.
/// [`FbxError::SerializationLengthMismatch`] is only ever an internal
/// consistency failure of the encoder, never caused by input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FbxError {
    #[error("not a binary FBX file")]
    NotFbxFormat,
    #[error("unsupported FBX version {version} (latest supported version is {max})")]
    UnsupportedVersion { version: u32, max: u32 },
    #[error("read out of bounds: wanted {wanted} bytes at offset {offset}")]
    OutOfBounds { offset: usize, wanted: usize },
    #[error("unknown property type 0x{0:02x}")]
    UnknownPropertyType(u8),
    #[error("unsupported array property type 0x{0:02x}")]
    UnknownArrayType(u8),
    #[error("unknown array encoding {0}")]
    UnknownEncoding(u32),
    #[error("inflated array length {actual} does not match expected length {expected}")]
    DecompressedLengthMismatch { expected: usize, actual: usize },
    #[error("failed to inflate array payload: {0}")]
    Inflate(String),
    #[error("node nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
    #[error("node with no name, properties or children cannot be encoded")]
    NullNodeInList,
    #[error("node name is {len} bytes long (max 255)")]
    NameTooLong { len: usize },
    #[error("document of {size} bytes does not fit 32-bit offsets")]
    DocumentTooLarge { size: usize },
    #[error("serialized {actual} bytes where {expected} were computed")]
    SerializationLengthMismatch { expected: usize, actual: usize },
}

impl From<BufferError> for FbxError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { offset, wanted } => FbxError::OutOfBounds { offset, wanted },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_error_maps_to_out_of_bounds() {
        let err: FbxError = BufferError::EndOfBuffer {
            offset: 40,
            wanted: 8,
        }
        .into();
        assert_eq!(
            err,
            FbxError::OutOfBounds {
                offset: 40,
                wanted: 8
            }
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            FbxError::UnsupportedVersion {
                version: 7500,
                max: 7400
            }
            .to_string(),
            "unsupported FBX version 7500 (latest supported version is 7400)"
        );
        assert_eq!(
            FbxError::UnknownPropertyType(b'Z').to_string(),
            "unknown property type 0x5a"
        );
        assert_eq!(
            FbxError::NullNodeInList.to_string(),
            "node with no name, properties or children cannot be encoded"
        );
    }
}
