// ## 📂 File: `src/headers/encode.rs`
//! src/headers/encode.rs
//!
//! Header encoding.
//!
//! Design notes:
//! - Serializes a `RawHeader` into a fixed 36-byte buffer.
//! - Field order must match `decode.rs` exactly.
//! - No integers involved; markers and digest are copied as raw bytes.

use crate::constants::{offsets, HEADER_LEN};
use crate::headers::types::RawHeader;

/// Serialize a `RawHeader` into its 36-byte wire form.
///
/// Layout: `prefix (0..2) ++ checksum (2..34) ++ suffix (34..36)`.
#[inline]
pub fn encode_header(h: &RawHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    let mut i = 0usize;

    fn put_bytes(out: &mut [u8], i: &mut usize, b: &[u8]) {
        out[*i..*i + b.len()].copy_from_slice(b);
        *i += b.len();
    }

    put_bytes(&mut out, &mut i, &h.prefix);   // 0..2   prefix marker
    put_bytes(&mut out, &mut i, &h.checksum); // 2..34  SHA-256 digest
    put_bytes(&mut out, &mut i, &h.suffix);   // 34..36 suffix marker

    debug_assert_eq!(i, HEADER_LEN, "encoding wrote incorrect length");
    debug_assert_eq!(offsets::SUFFIX + 2, i);

    out
}
