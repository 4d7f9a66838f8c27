//! headers/mod.rs
//! Public module export for the filehash header.
//!
//! Notes:
//! - Fixed-size header (36 bytes) at offset 0; payload always starts at offset 36.
//! - One byte layout (`RawHeader`), two views over it: `ParsedHeader` for
//!   readers (validated, immutable) and `HeaderSlot` for writers (checksum set once).
//! - No version field; the markers alone identify the format.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
