//! telemetry/mod.rs
//! Per-session counters, stage timers and immutable snapshots.
//!
//! Notes:
//! - Counters are plain integers owned by one session; no atomics.
//! - A snapshot is taken once, at finalize/close, and never mutated.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
