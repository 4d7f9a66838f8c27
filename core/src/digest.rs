//! digest.rs
//! Payload checksum value and the incremental SHA-256 accumulator that
//! produces it.

use std::fmt;

use sha2::{Digest as _, Sha256};
use thiserror::Error;

use crate::constants::CHECKSUM_LEN;

/// Errors parsing a checksum from its hex form.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChecksumParseError {
    #[error("checksum hex must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("checksum is not valid hex")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A 32-byte SHA-256 digest of a payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Checksum([u8; CHECKSUM_LEN]);

impl Checksum {
    /// The placeholder value written before finalize.
    pub const ZERO: Checksum = Checksum([0u8; CHECKSUM_LEN]);

    pub fn from_bytes(bytes: [u8; CHECKSUM_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; CHECKSUM_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Lowercase hex, always 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, ChecksumParseError> {
        if s.len() != CHECKSUM_LEN * 2 {
            return Err(ChecksumParseError::InvalidLength {
                expected: CHECKSUM_LEN * 2,
                actual: s.len(),
            });
        }
        let mut out = [0u8; CHECKSUM_LEN];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Self(out))
    }

    /// One-shot digest of an in-memory buffer.
    pub fn of(data: &[u8]) -> Self {
        let mut acc = ChecksumAccumulator::new();
        acc.update(data);
        acc.finalize()
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Checksum {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Running SHA-256 over payload bytes.
///
/// Fed in order; consumed by `finalize`, so a digest can only be produced once
/// per accumulator.
#[derive(Clone, Default)]
pub struct ChecksumAccumulator {
    state: Sha256,
    bytes: u64,
}

impl ChecksumAccumulator {
    #[inline]
    pub fn new() -> Self {
        Self { state: Sha256::new(), bytes: 0 }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
        self.bytes += data.len() as u64;
    }

    /// Number of bytes fed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    #[inline]
    pub fn finalize(self) -> Checksum {
        let digest = self.state.finalize();
        let mut out = [0u8; CHECKSUM_LEN];
        out.copy_from_slice(&digest);
        Checksum(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn known_vectors() {
        assert_eq!(Checksum::of(b"abc").to_hex(), ABC_SHA256);
        assert_eq!(Checksum::of(b"").to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut acc = ChecksumAccumulator::new();
        acc.update(b"a");
        acc.update(b"");
        acc.update(b"bc");
        assert_eq!(acc.bytes(), 3);
        assert_eq!(acc.finalize(), Checksum::of(b"abc"));
    }

    #[test]
    fn hex_parse() {
        let c = Checksum::from_hex(ABC_SHA256).unwrap();
        assert_eq!(c.to_string(), ABC_SHA256);
        assert!(matches!(
            Checksum::from_hex("abcd"),
            Err(ChecksumParseError::InvalidLength { expected: 64, actual: 4 })
        ));
        assert!(Checksum::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn bad_hex_keeps_decoder_error_as_source() {
        use std::error::Error as _;

        let err = Checksum::from_hex(&"zz".repeat(32)).unwrap_err();
        assert!(matches!(err, ChecksumParseError::InvalidHex(_)));
        assert_eq!(err.to_string(), "checksum is not valid hex");
        assert!(err.source().is_some());
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn zero_placeholder() {
        assert!(Checksum::ZERO.is_zero());
        assert_eq!(Checksum::ZERO.to_hex(), "0".repeat(64));
        assert!(!Checksum::of(b"").is_zero());
    }
}
