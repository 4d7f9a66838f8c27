//! constants.rs
//! Wire constants shared by the header codec, the writer and the reader.

/// Prefix marker at offset 0..2 identifying a filehash file.
pub const PREFIX: [u8; 2] = [0xCC, 0xFF];

/// Suffix marker at offset 34..36 closing the header.
pub const SUFFIX: [u8; 2] = [0xFF, 0xCC];

/// SHA-256 digest length in bytes.
pub const CHECKSUM_LEN: usize = 32;

/// Fixed header size: prefix (2) + checksum (32) + suffix (2).
pub const HEADER_LEN: usize = PREFIX.len() + CHECKSUM_LEN + SUFFIX.len();

/// Byte offsets of each header field.
pub mod offsets {
    use super::{CHECKSUM_LEN, HEADER_LEN};

    pub const PREFIX: usize = 0;
    pub const CHECKSUM: usize = 2;
    pub const SUFFIX: usize = CHECKSUM + CHECKSUM_LEN;
    pub const PAYLOAD: usize = HEADER_LEN;
}

/// Defaults when no chunk size is requested
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB
/// Smallest copy buffer the stream helpers accept.
pub const MIN_CHUNK_SIZE: usize = 4 * 1024; // 4 KiB
/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;
