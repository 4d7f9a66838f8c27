// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters used during a wrap or unwrap session.
//!
//! Converted into an immutable `SessionSnapshot` when the session ends.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic counters collected during one session
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub header_writes: u64,
    pub header_reads: u64,
    pub payload_chunks: u64,
    pub bytes_payload: u64,
    pub bytes_overhead: u64,
}

impl SessionCounters {
    /// Record one header write (placeholder or final) as overhead.
    pub fn add_header_write(&mut self, header_len: usize) {
        self.header_writes += 1;
        self.bytes_overhead += header_len as u64;
    }

    /// Record the header consumed by a reader.
    pub fn add_header_read(&mut self, header_len: usize) {
        self.header_reads += 1;
        self.bytes_overhead += header_len as u64;
    }

    /// Record one payload chunk that reached the sink (or left the source).
    pub fn add_payload(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.payload_chunks += 1;
        self.bytes_payload += len as u64;
    }

    /// Bytes on disk for this session's file.
    pub fn file_bytes(&self) -> u64 {
        // The final header overwrites the placeholder in place.
        let header = if self.header_writes > 0 || self.header_reads > 0 {
            crate::constants::HEADER_LEN as u64
        } else {
            0
        };
        header + self.bytes_payload
    }

    pub fn merge(&mut self, other: &SessionCounters) {
        self.header_writes += other.header_writes;
        self.header_reads += other.header_reads;
        self.payload_chunks += other.payload_chunks;
        self.bytes_payload += other.bytes_payload;
        self.bytes_overhead += other.bytes_overhead;
    }
}

impl AddAssign for SessionCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chunks_are_not_counted() {
        let mut c = SessionCounters::default();
        c.add_payload(0);
        c.add_payload(10);
        assert_eq!(c.payload_chunks, 1);
        assert_eq!(c.bytes_payload, 10);
    }

    #[test]
    fn file_bytes_counts_header_once() {
        let mut c = SessionCounters::default();
        c.add_header_write(36);
        c.add_payload(3);
        c.add_header_write(36);
        assert_eq!(c.bytes_overhead, 72);
        assert_eq!(c.file_bytes(), 39);
    }
}
