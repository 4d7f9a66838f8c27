// ## 📂 File: `src/stream/io.rs`
// ## Fixed-buffer copy + whole-file wrap / unwrap / verify helpers

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_CHUNK_SIZE, HEADER_LEN, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use crate::digest::{Checksum, ChecksumAccumulator};
use crate::stream::reader::StreamingReader;
use crate::stream::writer::{DurableSink, StreamingWriter};
use crate::telemetry::SessionSnapshot;
use crate::types::{FileHashError, Result};

/// Knobs for the whole-file helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapOptions {
    /// Copy buffer size; memory use is bounded by this, not by payload size.
    pub chunk_size: usize,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE }
    }
}

impl WrapOptions {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(FileHashError::InvalidOption(format!(
                "chunk_size {} outside {}..={}",
                self.chunk_size, MIN_CHUNK_SIZE, MAX_CHUNK_SIZE
            )));
        }
        Ok(())
    }
}

/// Outcome of a wrap, unwrap or verify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapReport {
    pub checksum: String,
    pub payload_bytes: u64,
    pub snapshot: SessionSnapshot,
}

/// Header facts without touching the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub checksum: String,
    pub sealed: bool,
    pub payload_bytes: u64,
}

/// Which side of a copy failed.
#[derive(Debug)]
pub enum CopyError {
    Read(io::Error),
    Write(io::Error),
}

impl CopyError {
    /// Attribute the failure to the source or destination path.
    pub fn at(self, src: &Path, dst: &Path) -> FileHashError {
        match self {
            CopyError::Read(e) => FileHashError::from(e).with_path(src),
            CopyError::Write(e) => FileHashError::from(e).with_path(dst),
        }
    }

    pub fn into_inner(self) -> io::Error {
        match self {
            CopyError::Read(e) | CopyError::Write(e) => e,
        }
    }
}

// We need this for the header: a single read() may legally return fewer bytes.
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(off)
}

/// Copy `r` into `w` through one fixed buffer of `chunk_size` bytes.
pub fn copy_chunked<R: Read + ?Sized, W: Write + ?Sized>(
    r: &mut R,
    w: &mut W,
    chunk_size: usize,
) -> std::result::Result<u64, CopyError> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;
    loop {
        let n = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        w.write_all(&buf[..n]).map_err(CopyError::Write)?;
        total += n as u64;
    }
    Ok(total)
}

/// `io::Write` sink that only hashes.
struct HashSink(ChecksumAccumulator);

impl Write for HashSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ================= Streams =================

/// Wrap everything `src` yields into `sink`.
pub fn wrap_stream<R: Read, W: DurableSink>(
    src: &mut R,
    sink: W,
    opts: &WrapOptions,
) -> Result<WrapReport> {
    opts.validate()?;
    let mut writer = StreamingWriter::new(sink)?;
    copy_chunked(src, &mut writer, opts.chunk_size).map_err(|e| e.into_inner())?;
    finish_writer(writer)
}

/// Strip the header from `src` and copy the payload into `dst`.
///
/// Returns the checksum stored in the header; the payload is not verified.
pub fn unwrap_stream<R: Read, W: Write>(src: R, dst: &mut W, opts: &WrapOptions) -> Result<WrapReport> {
    opts.validate()?;
    let mut reader = StreamingReader::from_reader(src)?;
    let n = copy_chunked(&mut reader, dst, opts.chunk_size).map_err(|e| e.into_inner())?;
    dst.flush()?;
    Ok(WrapReport { checksum: reader.checksum_hex(), payload_bytes: n, snapshot: reader.snapshot() })
}

/// Hash the payload of `src` and compare it with the header's checksum.
pub fn verify_stream<R: Read>(src: R, opts: &WrapOptions) -> Result<WrapReport> {
    opts.validate()?;
    let mut reader = StreamingReader::from_reader(src)?;
    verify_reader(&mut reader, opts)
}

fn verify_reader<R: Read>(reader: &mut StreamingReader<R>, opts: &WrapOptions) -> Result<WrapReport> {
    let mut sink = HashSink(ChecksumAccumulator::new());
    let n = copy_chunked(reader, &mut sink, opts.chunk_size).map_err(|e| e.into_inner())?;
    let actual = sink.0.finalize();
    let expected: Checksum = *reader.checksum();
    if actual != expected {
        debug!(path = ?reader.path(), %expected, %actual, "filehash checksum mismatch");
        return Err(FileHashError::ChecksumMismatch { expected, actual });
    }
    Ok(WrapReport { checksum: actual.to_hex(), payload_bytes: n, snapshot: reader.snapshot() })
}

fn finish_writer<W: DurableSink>(mut writer: StreamingWriter<W>) -> Result<WrapReport> {
    let checksum = writer.finalize()?;
    Ok(WrapReport {
        checksum: checksum.to_hex(),
        payload_bytes: writer.bytes_written(),
        snapshot: writer.snapshot(),
    })
}

// ================= Files =================

/// Wrap the file at `src` into a new filehash file at `dst`.
///
/// `dst` is created or truncated; on any error it holds an unusable partial
/// file and should be discarded by the caller.
pub fn wrap_file(src: &Path, dst: &Path, opts: &WrapOptions) -> Result<WrapReport> {
    opts.validate()?;
    let mut input = File::open(src).map_err(|e| FileHashError::io_at(src, e))?;
    let mut writer = StreamingWriter::create(dst)?;
    copy_chunked(&mut input, &mut writer, opts.chunk_size).map_err(|e| e.at(src, dst))?;
    let report = finish_writer(writer)?;
    debug!(src = %src.display(), dst = %dst.display(), bytes = report.payload_bytes, "wrapped");
    Ok(report)
}

/// Copy the payload of filehash file `src` into a new file at `dst`.
///
/// The header is validated before `dst` is created, so a non-filehash input
/// never produces output.
pub fn unwrap_file(src: &Path, dst: &Path, opts: &WrapOptions) -> Result<WrapReport> {
    opts.validate()?;
    let mut reader = StreamingReader::open(src)?;
    let mut out = File::create(dst).map_err(|e| FileHashError::io_at(dst, e))?;
    let n = copy_chunked(&mut reader, &mut out, opts.chunk_size).map_err(|e| e.at(src, dst))?;
    out.sync_all().map_err(|e| FileHashError::io_at(dst, e))?;
    debug!(src = %src.display(), dst = %dst.display(), bytes = n, "unwrapped");
    let report = WrapReport { checksum: reader.checksum_hex(), payload_bytes: n, snapshot: reader.snapshot() };
    reader.close();
    Ok(report)
}

/// Re-hash the payload of `path` and compare with its header.
pub fn verify_file(path: &Path, opts: &WrapOptions) -> Result<WrapReport> {
    opts.validate()?;
    let mut reader = StreamingReader::open(path)?;
    let report = verify_reader(&mut reader, opts).map_err(|e| e.with_path(path))?;
    reader.close();
    Ok(report)
}

/// Read only the header of `path`.
pub fn describe_file(path: &Path) -> Result<FileSummary> {
    let reader = StreamingReader::open(path)?;
    let len = reader
        .get_ref()
        .metadata()
        .map_err(|e| FileHashError::io_at(path, e))?
        .len();
    let summary = FileSummary {
        checksum: reader.checksum_hex(),
        sealed: reader.header().is_sealed(),
        payload_bytes: len.saturating_sub(HEADER_LEN as u64),
    };
    reader.close();
    Ok(summary)
}
