//! stream — single-pass wrap/unwrap over one file handle.
//!
//! `StreamingWriter` and `StreamingReader` share nothing at runtime except the
//! header layout in `crate::headers`.

pub mod io;
pub mod reader;
pub mod writer;

pub use io::{
    copy_chunked, describe_file, unwrap_file, unwrap_stream, verify_file, verify_stream,
    wrap_file, wrap_stream, CopyError, FileSummary, WrapOptions, WrapReport,
};
pub use reader::StreamingReader;
pub use writer::{DurableSink, StreamingWriter, WriterState};
