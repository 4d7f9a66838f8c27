//! CLI argument definitions using clap
//!
//! Usage:
//! - fh FILE...        wrap in place
//! - fh -d FILE...     unwrap in place
//! - fh -t FILE...     verify payload against the stored checksum
//! - fh -l FILE...     print stored checksum and payload size

use clap::{ArgGroup, Parser};
use filehash::constants::DEFAULT_CHUNK_SIZE;
use std::path::PathBuf;

/// fh - add or remove a filehash (SHA-256) header
#[derive(Parser, Debug)]
#[command(name = "fh")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["unwrap", "test", "list"])))]
pub struct Cli {
    /// Remove the filehash header, restoring the original bytes
    #[arg(short = 'd', long = "unwrap")]
    pub unwrap: bool,

    /// Verify the payload of each file against its header checksum
    #[arg(short = 't', long)]
    pub test: bool,

    /// Print the stored checksum and payload size of each file
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Print session statistics as JSON after each file
    #[arg(long)]
    pub stats: bool,

    /// Copy buffer size in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Wrap,
    Unwrap,
    Test,
    List,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.unwrap {
            Mode::Unwrap
        } else if self.test {
            Mode::Test
        } else if self.list {
            Mode::List
        } else {
            Mode::Wrap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_wrap() {
        let cli = Cli::try_parse_from(["fh", "a.txt"]).unwrap();
        assert_eq!(cli.mode(), Mode::Wrap);
        assert_eq!(cli.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(cli.files, vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn mode_flags() {
        assert_eq!(Cli::try_parse_from(["fh", "-d", "a"]).unwrap().mode(), Mode::Unwrap);
        assert_eq!(Cli::try_parse_from(["fh", "-t", "a"]).unwrap().mode(), Mode::Test);
        assert_eq!(Cli::try_parse_from(["fh", "-l", "a"]).unwrap().mode(), Mode::List);
    }

    #[test]
    fn modes_are_exclusive() {
        assert!(Cli::try_parse_from(["fh", "-d", "-t", "a"]).is_err());
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["fh", "-d"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["fh", "-vv", "a"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
