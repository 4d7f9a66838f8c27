//! fh - filehash utility
//!
//! Adds a SHA-256 checksum header to files and removes it again; operates
//! like gzip: files are replaced in place.
//!
//! main.rs only dispatches and reports; all logic lives in `commands`.

mod args;
mod commands;
mod logging;

fn main() {
    if let Err(e) = commands::run() {
        eprintln!("fh: {:#}", e);
        std::process::exit(1);
    }
}
