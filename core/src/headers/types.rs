// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! Header byte layout and its reader/writer views.
//!
//! Notes:
//! - `RawHeader` is the only type the codec knows; it carries no invariants.
//! - `ParsedHeader` can only be built through marker validation, so holding
//!   one proves the file started with a well-formed header.
//! - `HeaderSlot` is the writer's mutable copy: markers armed at create time,
//!   checksum filled exactly once at finalize time.

use thiserror::Error;

use crate::constants::{CHECKSUM_LEN, HEADER_LEN, PREFIX, SUFFIX};
use crate::digest::Checksum;
use crate::headers::{decode_header, encode_header};

/// Positional view of the 36 header bytes, as found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub prefix: [u8; 2],              // 0..2   prefix marker
    pub checksum: [u8; CHECKSUM_LEN], // 2..34  SHA-256 of payload
    pub suffix: [u8; 2],              // 34..36 suffix marker
}

impl RawHeader {
    pub const LEN: usize = HEADER_LEN;

    /// A header with both markers set and the given digest.
    pub fn sealed(checksum: [u8; CHECKSUM_LEN]) -> Self {
        Self { prefix: PREFIX, checksum, suffix: SUFFIX }
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        encode_header(self)
    }

    pub fn decode(buf: &[u8]) -> Result<Self, HeaderError> {
        decode_header(buf)
    }
}

/// Reader-side header. Immutable, markers already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedHeader {
    checksum: Checksum,
}

impl ParsedHeader {
    /// Validate both markers. Either one mismatching rejects the header.
    pub fn from_raw(raw: RawHeader) -> Result<Self, HeaderError> {
        if raw.prefix != PREFIX {
            return Err(HeaderError::InvalidPrefix { have: raw.prefix, need: PREFIX });
        }
        if raw.suffix != SUFFIX {
            return Err(HeaderError::InvalidSuffix { have: raw.suffix, need: SUFFIX });
        }
        Ok(Self { checksum: Checksum::from_bytes(raw.checksum) })
    }

    /// Decode and validate in one step.
    pub fn parse(buf: &[u8]) -> Result<Self, HeaderError> {
        Self::from_raw(decode_header(buf)?)
    }

    pub fn checksum(&self) -> &Checksum {
        &self.checksum
    }

    /// Lowercase, 64 characters.
    pub fn hex(&self) -> String {
        self.checksum.to_hex()
    }

    /// `false` when the checksum is still the all-zero placeholder, i.e. the
    /// writer never reached finalize.
    pub fn is_sealed(&self) -> bool {
        !self.checksum.is_zero()
    }
}

/// Writer-side header.
///
/// Starts empty (markers unset, zero checksum). The writer arms the markers
/// before flushing the placeholder and fills the checksum once on finalize.
#[derive(Debug, Clone, Default)]
pub struct HeaderSlot {
    raw: RawHeader,
    filled: bool,
}

impl Default for RawHeader {
    fn default() -> Self {
        Self { prefix: [0; 2], checksum: [0; CHECKSUM_LEN], suffix: [0; 2] }
    }
}

impl HeaderSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both markers; checksum stays zero.
    pub fn arm(&mut self) {
        self.raw.prefix = PREFIX;
        self.raw.suffix = SUFFIX;
    }

    pub fn is_armed(&self) -> bool {
        self.raw.prefix == PREFIX && self.raw.suffix == SUFFIX
    }

    /// Store the final digest. Only the first call has effect.
    pub fn fill(&mut self, checksum: &Checksum) -> Result<(), HeaderError> {
        if self.filled {
            return Err(HeaderError::AlreadyFilled);
        }
        self.raw.checksum = *checksum.as_bytes();
        self.filled = true;
        Ok(())
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        encode_header(&self.raw)
    }

    pub fn raw(&self) -> &RawHeader {
        &self.raw
    }
}

pub fn fmt_bytes(b: &[u8]) -> String {
    format!("0x{}", hex::encode(b))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Fewer than 36 bytes available; not a filehash file.
    #[error("header too short: {have} < {need} bytes")]
    TooShort { have: usize, need: usize },

    /// First two bytes are not the prefix marker.
    #[error("invalid header: prefix marker expected {}, got {}", fmt_bytes(.need), fmt_bytes(.have))]
    InvalidPrefix { have: [u8; 2], need: [u8; 2] },

    /// Bytes 34..36 are not the suffix marker.
    #[error("invalid header: suffix marker expected {}, got {}", fmt_bytes(.need), fmt_bytes(.have))]
    InvalidSuffix { have: [u8; 2], need: [u8; 2] },

    /// Writer tried to store a second checksum.
    #[error("header checksum already filled")]
    AlreadyFilled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_starts_unarmed_and_zeroed() {
        let slot = HeaderSlot::new();
        assert!(!slot.is_armed());
        assert!(!slot.is_filled());
        assert_eq!(slot.encode(), [0u8; HEADER_LEN]);
    }

    #[test]
    fn slot_fill_is_one_shot() {
        let mut slot = HeaderSlot::new();
        slot.arm();
        slot.fill(&Checksum::from_bytes([1; 32])).unwrap();
        let err = slot.fill(&Checksum::from_bytes([2; 32])).unwrap_err();
        assert_eq!(err, HeaderError::AlreadyFilled);
        assert_eq!(slot.raw().checksum, [1; 32]);
    }

    #[test]
    fn error_messages_show_marker_bytes() {
        let err = HeaderError::InvalidPrefix { have: [0x00, 0x01], need: PREFIX };
        assert_eq!(
            err.to_string(),
            "invalid header: prefix marker expected 0xccff, got 0x0001"
        );
    }
}
