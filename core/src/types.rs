use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::digest::Checksum;
use crate::headers::HeaderError;

/// Unified error covering I/O, header format, writer session state and
/// payload integrity.
/// - `From<T>` impls enable `?` across modules.
/// - `Io` keeps the path when the failing call knew one.
#[derive(Debug, Error)]
pub enum FileHashError {
    /// Underlying storage failure (open, create, read, write, seek, sync).
    #[error("I/O error{}", path_suffix(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Header missing, short, or with wrong markers. Not a filehash file.
    #[error("format error")]
    Format(#[from] HeaderError),

    /// Writer already wrote its final header.
    #[error("write session already finalized")]
    AlreadyFinalized,

    /// Writer's sink failed mid-stream; output must be discarded.
    #[error("write session poisoned by an earlier I/O failure")]
    SessionPoisoned,

    /// Payload digest differs from the one stored in the header.
    #[error("checksum mismatch: header {expected}, payload {actual}")]
    ChecksumMismatch { expected: Checksum, actual: Checksum },

    /// Rejected caller-supplied option.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" on {}", p.display()),
        None => String::new(),
    }
}

impl FileHashError {
    pub fn io_at(path: impl AsRef<Path>, source: io::Error) -> Self {
        FileHashError::Io { path: Some(path.as_ref().to_path_buf()), source }
    }

    /// The input is not a (well-formed) filehash file.
    pub fn is_format(&self) -> bool {
        matches!(self, FileHashError::Format(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, FileHashError::Io { .. })
    }

    /// Attach a path to a pathless I/O error; other variants pass through.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            FileHashError::Io { path: None, source } => FileHashError::io_at(path, source),
            other => other,
        }
    }
}

impl From<io::Error> for FileHashError {
    fn from(e: io::Error) -> Self {
        FileHashError::Io { path: None, source: e }
    }
}

/// Map back into `io::Error` for the `Read`/`Write` trait impls.
impl From<FileHashError> for io::Error {
    fn from(e: FileHashError) -> Self {
        match e {
            FileHashError::Io { source, .. } => source,
            FileHashError::Format(_) | FileHashError::ChecksumMismatch { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, e)
            }
            FileHashError::InvalidOption(_) => io::Error::new(io::ErrorKind::InvalidInput, e),
            other => io::Error::other(other),
        }
    }
}

pub type Result<T, E = FileHashError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_includes_path() {
        let e = FileHashError::io_at("/nope/file", io::Error::from(io::ErrorKind::NotFound));
        let msg = e.to_string();
        assert_eq!(msg, "I/O error on /nope/file");
        assert!(e.is_io());
    }

    fn chain(e: &dyn std::error::Error) -> Vec<String> {
        let mut out = vec![e.to_string()];
        let mut cur = e.source();
        while let Some(inner) = cur {
            out.push(inner.to_string());
            cur = inner.source();
        }
        out
    }

    #[test]
    fn source_messages_appear_once_in_chain() {
        let e = FileHashError::Format(HeaderError::InvalidPrefix { have: [0x70, 0x6c], need: [0xCC, 0xFF] });
        assert_eq!(
            chain(&e),
            ["format error", "invalid header: prefix marker expected 0xccff, got 0x706c"]
        );

        let e = FileHashError::io_at("f", io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(chain(&e), ["I/O error on f", "disk full"]);
    }

    #[test]
    fn with_path_only_fills_missing_path() {
        let e = FileHashError::from(io::Error::from(io::ErrorKind::PermissionDenied)).with_path("a");
        assert!(matches!(e, FileHashError::Io { path: Some(ref p), .. } if p == Path::new("a")));

        let e = FileHashError::io_at("a", io::Error::from(io::ErrorKind::Other)).with_path("b");
        assert!(matches!(e, FileHashError::Io { path: Some(ref p), .. } if p == Path::new("a")));
    }

    #[test]
    fn format_errors_map_to_invalid_data() {
        let e: io::Error = FileHashError::Format(HeaderError::TooShort { have: 0, need: 36 }).into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
    }
}
