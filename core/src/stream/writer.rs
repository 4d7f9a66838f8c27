// ## 📂 File: `src/stream/writer.rs`

//! Streaming writer: placeholder header first, payload through SHA-256,
//! real header backfilled at offset 0 on finalize.
//!
//! Session states:
//!
//! ```text
//! Created -> HeaderReserved -> Streaming -> Finalized
//!                                  \
//!                                   -> Poisoned (sink failed; discard output)
//! ```
//!
//! `Created` and `HeaderReserved` only exist inside [`StreamingWriter::new`];
//! a writer handed to the caller is already `Streaming`.

use std::fs::File;
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::HEADER_LEN;
use crate::digest::{Checksum, ChecksumAccumulator};
use crate::headers::HeaderSlot;
use crate::telemetry::{SessionCounters, SessionSnapshot, SessionTimer, Stage};
use crate::types::{FileHashError, Result};

/// A seekable sink that can be made durable.
///
/// The header backfill needs `Seek`; pipes and sockets cannot host a
/// filehash writer.
pub trait DurableSink: Write + Seek {
    /// Drop everything at or past offset `len`.
    fn truncate_at(&mut self, len: u64) -> io::Result<()>;

    /// Push written bytes to stable storage.
    fn sync_durable(&mut self) -> io::Result<()>;
}

impl DurableSink for File {
    fn truncate_at(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync_durable(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

fn truncate_vec(buf: &mut Vec<u8>, len: u64) -> io::Result<()> {
    let len = usize::try_from(len).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
    buf.truncate(len);
    Ok(())
}

impl DurableSink for Cursor<Vec<u8>> {
    fn truncate_at(&mut self, len: u64) -> io::Result<()> {
        truncate_vec(self.get_mut(), len)
    }

    fn sync_durable(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl DurableSink for Cursor<&mut Vec<u8>> {
    fn truncate_at(&mut self, len: u64) -> io::Result<()> {
        truncate_vec(self.get_mut(), len)
    }

    fn sync_durable(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: DurableSink + ?Sized> DurableSink for &mut S {
    fn truncate_at(&mut self, len: u64) -> io::Result<()> {
        (**self).truncate_at(len)
    }

    fn sync_durable(&mut self) -> io::Result<()> {
        (**self).sync_durable()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Streaming,
    Finalized,
    Poisoned,
}

pub struct StreamingWriter<W: DurableSink> {
    sink: W,
    path: Option<PathBuf>,
    header: HeaderSlot,
    // Taken (consumed) exactly once, by finalize.
    hasher: Option<ChecksumAccumulator>,
    state: WriterState,
    counters: SessionCounters,
    timer: SessionTimer,
}

impl StreamingWriter<File> {
    /// Create or truncate `path` and reserve the header.
    ///
    /// # Errors
    /// `Io` carrying `path` if the file cannot be created or the placeholder
    /// header cannot be written.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| FileHashError::io_at(path, e))?;
        let mut writer = Self::new(file).map_err(|e| e.with_path(path))?;
        writer.path = Some(path.to_path_buf());
        debug!(path = %path.display(), "filehash writer created");
        Ok(writer)
    }
}

impl<W: DurableSink> StreamingWriter<W> {
    /// Start a session over `sink`.
    ///
    /// The placeholder header (markers set, zero checksum) goes to offset 0 of
    /// the sink, so payload always starts at offset 36. Stale bytes already in
    /// the sink past the payload are cut off on finalize.
    pub fn new(mut sink: W) -> Result<Self> {
        let mut timer = SessionTimer::new();
        let mut counters = SessionCounters::default();

        // Created -> HeaderReserved
        let mut header = HeaderSlot::new();
        header.arm();
        let placeholder = header.encode();
        timer.time(Stage::Header, || -> io::Result<()> {
            sink.seek(SeekFrom::Start(0))?;
            sink.write_all(&placeholder)
        })?;
        counters.add_header_write(HEADER_LEN);

        // HeaderReserved -> Streaming
        Ok(Self {
            sink,
            path: None,
            header,
            hasher: Some(ChecksumAccumulator::new()),
            state: WriterState::Streaming,
            counters,
            timer,
        })
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Payload bytes accepted so far (excludes the header).
    pub fn bytes_written(&self) -> u64 {
        self.counters.bytes_payload
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&self.counters, &self.timer)
    }

    fn check_streaming(&self) -> Result<()> {
        match self.state {
            WriterState::Streaming => Ok(()),
            WriterState::Finalized => Err(FileHashError::AlreadyFinalized),
            WriterState::Poisoned => Err(FileHashError::SessionPoisoned),
        }
    }

    fn poison(&mut self, err: io::Error) -> FileHashError {
        self.state = WriterState::Poisoned;
        warn!(
            path = ?self.path,
            bytes = self.counters.bytes_payload,
            error = %err,
            "filehash write session poisoned; output must be discarded"
        );
        let err = FileHashError::from(err);
        match &self.path {
            Some(p) => err.with_path(p),
            None => err,
        }
    }

    /// Append payload. Exactly the bytes the sink accepted are hashed.
    ///
    /// # Errors
    /// - `Io` on sink failure; the session is then `Poisoned`.
    /// - `AlreadyFinalized` / `SessionPoisoned` outside the `Streaming` state.
    pub fn write_payload(&mut self, buf: &[u8]) -> Result<usize> {
        self.check_streaming()?;

        let n = match self.timer.time(Stage::Write, || self.sink.write(buf)) {
            Ok(n) => n,
            // Nothing was written; the session stays consistent.
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Err(e.into()),
            Err(e) => return Err(self.poison(e)),
        };

        let hasher = self.hasher.as_mut().ok_or(FileHashError::AlreadyFinalized)?;
        self.timer.time(Stage::Hash, || hasher.update(&buf[..n]));
        self.counters.add_payload(n);
        Ok(n)
    }

    /// Finalize the digest and overwrite the placeholder header in place.
    ///
    /// Returns the payload checksum. Only the first successful call does any
    /// work; later calls fail with `AlreadyFinalized`.
    ///
    /// # Errors
    /// `Io` if the truncate, seek, rewrite, flush or sync fails. The payload is then on
    /// disk with a zero checksum and the session is `Poisoned`.
    pub fn finalize(&mut self) -> Result<Checksum> {
        self.check_streaming()?;

        let hasher = self.hasher.take().ok_or(FileHashError::AlreadyFinalized)?;
        let checksum = self.timer.time(Stage::Hash, || hasher.finalize());
        self.header
            .fill(&checksum)
            .map_err(|_| FileHashError::AlreadyFinalized)?;

        if let Err(e) = self.rewrite_header() {
            return Err(self.poison(e));
        }

        self.state = WriterState::Finalized;
        debug!(
            path = ?self.path,
            bytes = self.counters.bytes_payload,
            checksum = %checksum,
            "filehash writer finalized"
        );
        Ok(checksum)
    }

    fn rewrite_header(&mut self) -> io::Result<()> {
        let bytes = self.header.encode();
        let end = HEADER_LEN as u64 + self.counters.bytes_payload;
        let sink = &mut self.sink;
        self.timer.time(Stage::Header, || -> io::Result<()> {
            // Everything past the header must be payload.
            sink.truncate_at(end)?;
            sink.seek(SeekFrom::Start(0))?;
            sink.write_all(&bytes)?;
            sink.flush()
        })?;
        self.counters.add_header_write(HEADER_LEN);
        self.timer.time(Stage::Sync, || sink.sync_durable())
    }

    /// Finalize and release the sink.
    pub fn close(mut self) -> Result<Checksum> {
        self.finalize()
    }
}

impl<W: DurableSink> Write for StreamingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_payload(buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check_streaming().map_err(io::Error::from)?;
        self.sink.flush()
    }
}

impl<W: DurableSink> Drop for StreamingWriter<W> {
    fn drop(&mut self) {
        if self.state == WriterState::Streaming {
            warn!(
                path = ?self.path,
                bytes = self.counters.bytes_payload,
                "filehash writer dropped before finalize; header checksum left zero"
            );
        }
    }
}
