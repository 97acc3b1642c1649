//! FBX binary format constants.

/// ASCII magic at the very start of every binary FBX file (two trailing spaces).
pub const MAGIC: &[u8; 20] = b"Kaydara FBX Binary  ";

/// Bytes that follow [`MAGIC`] to complete the preamble.
pub const MAGIC_TAIL: [u8; 3] = [0x00, 0x1A, 0x00];

/// Magic plus its tail.
pub const PREAMBLE_LEN: usize = 23;

/// Byte offset of the first top-level node (preamble + u32 version).
pub const HEADER_LEN: usize = PREAMBLE_LEN + 4;

/// Highest document version this codec accepts.
pub const MAX_VERSION: u32 = 7400;

/// Fixed part of every node record: end offset, property count, property list
/// length (u32 each) and the name length byte.
pub const NODE_HEADER_LEN: usize = 13;

/// A null sentinel node is a bare, all-zero node header.
pub const SENTINEL_LEN: usize = NODE_HEADER_LEN;

/// Array property header: tag byte, element count, encoding, payload length.
pub const ARRAY_HEADER_LEN: usize = 1 + 4 + 4 + 4;

/// Array `encoding` value for raw element data.
pub const ENCODING_RAW: u32 = 0;

/// Array `encoding` value for a zlib-compressed payload.
pub const ENCODING_DEFLATE: u32 = 1;

/// Longest node name the one-byte length field can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Default nesting limit enforced by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 256;

const FOOTER_ID: [u8; 16] = [
    0xfa, 0xbc, 0xab, 0x09, 0xd0, 0xc8, 0xd4, 0x66, 0xb1, 0x76, 0xfb, 0x83, 0x1c, 0xf7, 0x26, 0x7e,
];

const FOOTER_MAGIC: [u8; 16] = [
    0xf8, 0x5a, 0x8c, 0x6a, 0xde, 0xf5, 0xd9, 0x7e, 0xec, 0xe9, 0x0c, 0xe3, 0x75, 0x8f, 0x29, 0x0b,
];

/// Length of the fixed trailer written after the last sentinel.
pub const FOOTER_LEN: usize = 160;

/// The fixed trailer, written verbatim by the encoder and ignored on decode.
///
/// Layout: footer id (16), zero padding (20), `e8 1c 00 00` (4), zero padding
/// (104), footer magic (16).
pub const FOOTER: [u8; FOOTER_LEN] = build_footer();

const fn build_footer() -> [u8; FOOTER_LEN] {
    let mut out = [0u8; FOOTER_LEN];
    let mut i = 0;
    while i < 16 {
        out[i] = FOOTER_ID[i];
        out[FOOTER_LEN - 16 + i] = FOOTER_MAGIC[i];
        i += 1;
    }
    out[36] = 0xe8;
    out[37] = 0x1c;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_layout() {
        assert_eq!(MAGIC.len() + MAGIC_TAIL.len(), PREAMBLE_LEN);
        assert_eq!(HEADER_LEN, 27);
    }

    #[test]
    fn footer_layout() {
        assert_eq!(&FOOTER[..4], &[0xfa, 0xbc, 0xab, 0x09]);
        assert!(FOOTER[16..36].iter().all(|&b| b == 0));
        assert_eq!(&FOOTER[36..40], &[0xe8, 0x1c, 0x00, 0x00]);
        assert!(FOOTER[40..144].iter().all(|&b| b == 0));
        assert_eq!(&FOOTER[144..], &FOOTER_MAGIC);
    }
}
