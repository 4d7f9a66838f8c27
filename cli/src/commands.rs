//! Command dispatch and in-place file replacement.
//!
//! Every mutating command stages its output in a temporary file next to the
//! target (same filesystem) and renames it over the original only after the
//! new content is complete and synced. Any failure before the rename leaves
//! the original untouched and the temporary file is removed on drop.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use filehash::stream::{copy_chunked, describe_file, verify_file, wrap_stream, FileSummary};
use filehash::{StreamingReader, WrapOptions, WrapReport};
use tempfile::{Builder, TempPath};
use tracing::{debug, info};

use crate::args::{Cli, Mode};
use crate::logging;

/// Parse arguments, process each file, fail if any file failed.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let opts = WrapOptions::with_chunk_size(cli.chunk_size);
    opts.validate()?;

    let mode = cli.mode();
    let mut failed = 0usize;
    let stdout = std::io::stdout();

    for path in &cli.files {
        match run_one(mode, path, &opts) {
            Ok(Outcome::Report(report)) => {
                if mode == Mode::Test {
                    info!(path = %path.display(), "OK");
                }
                if cli.stats {
                    writeln!(stdout.lock(), "{}", serde_json::to_string_pretty(&report)?)?;
                }
            }
            Ok(Outcome::Summary(summary)) => {
                writeln!(stdout.lock(), "{}", format_summary(path, &summary))?;
            }
            Err(e) => {
                report_failure(&mut std::io::stderr().lock(), path, &e)?;
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed", failed, cli.files.len());
    }
    Ok(())
}

#[derive(Debug)]
pub enum Outcome {
    Report(WrapReport),
    Summary(FileSummary),
}

pub fn run_one(mode: Mode, path: &Path, opts: &WrapOptions) -> Result<Outcome> {
    match mode {
        Mode::Wrap => wrap_in_place(path, opts).map(Outcome::Report),
        Mode::Unwrap => unwrap_in_place(path, opts).map(Outcome::Report),
        Mode::Test => Ok(Outcome::Report(verify_file(path, opts)?)),
        Mode::List => Ok(Outcome::Summary(describe_file(path)?)),
    }
}

/// One line per failed file; the tracing event only shows up with `-vv`.
fn report_failure<W: Write>(out: &mut W, path: &Path, e: &anyhow::Error) -> std::io::Result<()> {
    debug!(path = %path.display(), error = ?e, "file failed");
    writeln!(out, "fh: {}: {:#}", path.display(), e)
}

fn format_summary(path: &Path, s: &FileSummary) -> String {
    let state = if s.sealed { "sealed" } else { "unsealed" };
    format!("{}  {:>12}  {:<8}  {}", s.checksum, s.payload_bytes, state, path.display())
}

/// Temporary file in the same directory as `target`, so the final rename is atomic.
fn stage_next_to(target: &Path) -> Result<(File, TempPath)> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = Builder::new()
        .prefix(".fh-")
        .tempfile_in(dir)
        .with_context(|| format!("cannot stage temporary file in {}", dir.display()))?;
    Ok(tmp.into_parts())
}

fn replace(staged: TempPath, target: &Path, perms: fs::Permissions) -> Result<()> {
    fs::set_permissions(&staged, perms)
        .with_context(|| format!("cannot copy permissions to {}", staged.display()))?;
    staged
        .persist(target)
        .with_context(|| format!("cannot replace {}", target.display()))?;
    Ok(())
}

/// Prepend a filehash header to `path`.
pub fn wrap_in_place(path: &Path, opts: &WrapOptions) -> Result<WrapReport> {
    let mut src = File::open(path).with_context(|| format!("bad source file {}", path.display()))?;
    let perms = src.metadata()?.permissions();

    let (staged_file, staged_path) = stage_next_to(path)?;
    let report = wrap_stream(&mut src, staged_file, opts)
        .with_context(|| format!("wrapping {}", path.display()))?;
    drop(src);

    replace(staged_path, path, perms)?;
    info!(path = %path.display(), checksum = %report.checksum, bytes = report.payload_bytes, "wrapped");
    Ok(report)
}

/// Strip the filehash header from `path`.
///
/// The header is validated before anything is staged; a file that is not a
/// filehash file is left exactly as it was.
pub fn unwrap_in_place(path: &Path, opts: &WrapOptions) -> Result<WrapReport> {
    let mut reader = StreamingReader::open(path)?;
    let perms = reader.get_ref().metadata()?.permissions();

    let (mut staged_file, staged_path) = stage_next_to(path)?;
    let n = copy_chunked(&mut reader, &mut staged_file, opts.chunk_size)
        .map_err(|e| e.at(path, &staged_path))?;
    staged_file
        .sync_all()
        .with_context(|| format!("cannot sync {}", staged_path.display()))?;
    drop(staged_file);

    let report = WrapReport {
        checksum: reader.checksum_hex(),
        payload_bytes: n,
        snapshot: reader.snapshot(),
    };
    reader.close();

    replace(staged_path, path, perms)?;
    info!(path = %path.display(), bytes = n, "unwrapped");
    Ok(report)
}
