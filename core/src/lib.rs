//! filehash
//!
//! Self-describing file wrapping: a 36-byte header carrying the SHA-256 of
//! the payload that follows it.
//!
//! ```text
//! 0       2                          34      36 ... n
//! [prefix][        sha256            ][suffix][payload]
//!  CC FF                               FF CC
//! ```

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod digest;
pub mod headers;
pub mod telemetry;

// Stream layer
pub mod stream;

pub use digest::{Checksum, ChecksumAccumulator};
pub use headers::{HeaderError, HeaderSlot, ParsedHeader, RawHeader};
pub use stream::{StreamingReader, StreamingWriter, WrapOptions, WrapReport};
pub use types::{FileHashError, Result};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::constants::{HEADER_LEN, PREFIX, SUFFIX};
    pub use crate::digest::Checksum;
    pub use crate::stream::{
        unwrap_file, verify_file, wrap_file, StreamingReader, StreamingWriter, WrapOptions,
    };
    pub use crate::types::{FileHashError, Result};
}
