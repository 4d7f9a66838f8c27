// ## 📂 File: `src/headers/decode.rs`
//! src/headers/decode.rs
//!
//! Header decoding.
//!
//! Design notes:
//! - Splits the first 36 bytes positionally into prefix, checksum and suffix.
//! - Field order must match `encode.rs` exactly.
//! - Markers are NOT checked here; `ParsedHeader::from_raw` owns validation.

use crate::constants::{CHECKSUM_LEN, HEADER_LEN};
use crate::headers::types::{HeaderError, RawHeader};

/// Deserialize the leading 36 bytes of `buf` into a `RawHeader`.
///
/// # Returns
/// - `Ok(RawHeader)` when at least 36 bytes are present (extra bytes are ignored).
/// - `Err(HeaderError::TooShort)` otherwise.
#[inline]
pub fn decode_header(buf: &[u8]) -> Result<RawHeader, HeaderError> {
    if buf.len() < HEADER_LEN {
        return Err(HeaderError::TooShort { have: buf.len(), need: HEADER_LEN });
    }

    let mut i = 0usize;
    #[inline]
    fn get_bytes<const N: usize>(buf: &[u8], i: &mut usize) -> [u8; N] {
        let mut dst = [0u8; N];
        dst.copy_from_slice(&buf[*i..*i + N]);
        *i += N;
        dst
    }

    let prefix = get_bytes::<2>(buf, &mut i);              // 0..2
    let checksum = get_bytes::<CHECKSUM_LEN>(buf, &mut i); // 2..34
    let suffix = get_bytes::<2>(buf, &mut i);              // 34..36

    debug_assert_eq!(i, HEADER_LEN);

    Ok(RawHeader { prefix, checksum, suffix })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_does_not_validate_markers() {
        let buf = [0u8; HEADER_LEN];
        let raw = decode_header(&buf).unwrap();
        assert_eq!(raw.prefix, [0, 0]);
        assert_eq!(raw.suffix, [0, 0]);
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let err = decode_header(&[0xCC, 0xFF, 0x00]).unwrap_err();
        assert!(matches!(err, HeaderError::TooShort { have: 3, need: HEADER_LEN }));
    }
}
