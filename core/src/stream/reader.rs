// ## 📂 File: `src/stream/reader.rs`

//! Streaming reader: validates the 36-byte header up front, then hands out
//! payload bytes verbatim.
//!
//! The reader never checks the payload against the stored digest; it only
//! exposes it. See [`crate::stream::verify_stream`] for that.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::HEADER_LEN;
use crate::digest::Checksum;
use crate::headers::{HeaderError, ParsedHeader};
use crate::stream::io::read_exact_or_eof;
use crate::telemetry::{SessionCounters, SessionSnapshot, SessionTimer, Stage};
use crate::types::{FileHashError, Result};

#[derive(Debug)]
pub struct StreamingReader<R: Read> {
    inner: R,
    path: Option<PathBuf>,
    header: ParsedHeader,
    counters: SessionCounters,
    timer: SessionTimer,
}

impl StreamingReader<File> {
    /// Open `path` and validate its header.
    ///
    /// # Errors
    /// - `Io` carrying `path` if the file is missing or unreadable.
    /// - `Format` if fewer than 36 bytes exist or a marker is wrong.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FileHashError::io_at(path, e))?;
        let mut reader = Self::from_reader(file).map_err(|e| e.with_path(path))?;
        reader.path = Some(path.to_path_buf());
        debug!(path = %path.display(), checksum = %reader.checksum(), "filehash reader opened");
        Ok(reader)
    }
}

impl<R: Read> StreamingReader<R> {
    /// Consume and validate the header from `inner`.
    ///
    /// Short reads are retried until 36 bytes arrive or the source hits EOF;
    /// a header cut short by EOF is a `Format` error, never a partial parse.
    pub fn from_reader(mut inner: R) -> Result<Self> {
        let mut timer = SessionTimer::new();
        let mut counters = SessionCounters::default();

        let mut buf = [0u8; HEADER_LEN];
        let have = timer.time(Stage::Header, || read_exact_or_eof(&mut inner, &mut buf))?;
        if have < HEADER_LEN {
            return Err(HeaderError::TooShort { have, need: HEADER_LEN }.into());
        }
        let header = ParsedHeader::parse(&buf)?;
        counters.add_header_read(HEADER_LEN);

        Ok(Self { inner, path: None, header, counters, timer })
    }

    pub fn header(&self) -> &ParsedHeader {
        &self.header
    }

    pub fn checksum(&self) -> &Checksum {
        self.header.checksum()
    }

    /// Stored checksum as 64 lowercase hex characters.
    pub fn checksum_hex(&self) -> String {
        self.header.hex()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Payload bytes handed out so far.
    pub fn bytes_read(&self) -> u64 {
        self.counters.bytes_payload
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&self.counters, &self.timer)
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Release the handle. Read sessions never mutate the file.
    pub fn close(self) {
        debug!(path = ?self.path, bytes = self.counters.bytes_payload, "filehash reader closed");
    }
}

impl<R: Read> Read for StreamingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.timer.time(Stage::Read, || self.inner.read(buf))?;
        self.counters.add_payload(n);
        Ok(n)
    }
}
