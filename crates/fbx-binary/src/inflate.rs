//! Decompression capability for compressed array properties.
//!
//! The decoder never talks to a compression library directly; it calls an
//! [`Inflate`] implementation handed to it at construction time. Closures of
//! the shape `Fn(&[u8], usize) -> Result<Vec<u8>, InflateError>` implement the trait,
//! so tests and embedders can plug in anything.

use std::fmt;

/// Error reported by an [`Inflate`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflateError {
    message: String,
}

impl InflateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for InflateError {}

impl From<std::io::Error> for InflateError {
    fn from(err: std::io::Error) -> Self {
        InflateError::new(err.to_string())
    }
}

/// Turns a compressed array payload back into its raw element bytes.
///
/// Called once per compressed array, and the call must complete before the
/// decoder reads past the array. An implementation that hands work to another
/// thread blocks here until the result is ready.
///
/// `expected_len` is the byte length the array header promises. Output past
/// `expected_len + 1` bytes is never needed: one extra byte is enough for the
/// decoder to report the mismatch, so implementations should stop there.
pub trait Inflate {
    fn inflate(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>, InflateError>;
}

impl<F> Inflate for F
where
    F: Fn(&[u8], usize) -> Result<Vec<u8>, InflateError>,
{
    fn inflate(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>, InflateError> {
        self(data, expected_len)
    }
}

/// Rejects every compressed payload. Used when no decompressor is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInflate;

impl Inflate for NoInflate {
    fn inflate(&self, _data: &[u8], _expected_len: usize) -> Result<Vec<u8>, InflateError> {
        Err(InflateError::new("no decompressor configured"))
    }
}

/// zlib (RFC 1950) decompressor backed by `flate2`.
#[cfg(feature = "zlib")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibInflate;

#[cfg(feature = "zlib")]
impl Inflate for ZlibInflate {
    fn inflate(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>, InflateError> {
        use std::io::Read;

        let limit = (expected_len as u64).saturating_add(1);
        let mut out = Vec::new();
        flate2::read::ZlibDecoder::new(data)
            .take(limit)
            .read_to_end(&mut out)?;
        Ok(out)
    }
}

/// The capability used by [`FbxDecoder::new`](crate::FbxDecoder::new).
#[cfg(feature = "zlib")]
pub type DefaultInflate = ZlibInflate;

/// The capability used by [`FbxDecoder::new`](crate::FbxDecoder::new).
#[cfg(not(feature = "zlib"))]
pub type DefaultInflate = NoInflate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_inflaters() {
        let identity =
            |data: &[u8], _: usize| -> Result<Vec<u8>, InflateError> { Ok(data.to_vec()) };
        assert_eq!(identity.inflate(&[1, 2, 3], 3).unwrap(), vec![1, 2, 3]);
        let borrowed = &identity;
        assert_eq!(borrowed.inflate(&[4], 1).unwrap(), vec![4]);
    }

    #[test]
    fn no_inflate_rejects() {
        let err = NoInflate.inflate(&[0x78, 0x9c], 4).unwrap_err();
        assert_eq!(err.message(), "no decompressor configured");
    }

    #[cfg(feature = "zlib")]
    #[test]
    fn zlib_inflate_roundtrip() {
        use std::io::Write;

        let raw: Vec<u8> = (0..64u8).collect();
        let mut enc = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(&raw).unwrap();
        let compressed = enc.finish().unwrap();
        assert_eq!(ZlibInflate.inflate(&compressed, 64).unwrap(), raw);
    }

    #[cfg(feature = "zlib")]
    #[test]
    fn zlib_inflate_stops_one_byte_past_expected() {
        use std::io::Write;

        let mut enc = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
        enc.write_all(&vec![0u8; 1 << 20]).unwrap();
        let compressed = enc.finish().unwrap();
        assert!(compressed.len() < 4096);

        assert_eq!(ZlibInflate.inflate(&compressed, 16).unwrap().len(), 17);
        assert_eq!(ZlibInflate.inflate(&compressed, 0).unwrap().len(), 1);
        assert_eq!(
            ZlibInflate.inflate(&compressed, 1 << 20).unwrap().len(),
            1 << 20
        );
    }

    #[cfg(feature = "zlib")]
    #[test]
    fn zlib_inflate_rejects_garbage() {
        assert!(ZlibInflate.inflate(&[0x00, 0x01, 0x02], 3).is_err());
    }
}
