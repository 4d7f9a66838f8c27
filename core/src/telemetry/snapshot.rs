// ## src/telemetry/snapshot.rs

//! telemetry/snapshot.rs
//! Immutable view of a finished session, serializable for CLI `--stats`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::SessionCounters;
use crate::telemetry::timers::{SessionTimer, StageTimes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub header_writes: u64,
    pub header_reads: u64,
    pub payload_chunks: u64,
    pub bytes_payload: u64,
    pub bytes_overhead: u64,
    pub throughput_payload_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl SessionSnapshot {
    pub fn from(counters: &SessionCounters, timer: &SessionTimer) -> Self {
        let elapsed = timer.elapsed();
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_payload as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            header_writes: counters.header_writes,
            header_reads: counters.header_reads,
            payload_chunks: counters.payload_chunks,
            bytes_payload: counters.bytes_payload,
            bytes_overhead: counters.bytes_overhead,
            throughput_payload_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Stage time can never exceed wall-clock time.
    pub fn sanity_check(&self) -> bool {
        self.total_stage_time() <= self.elapsed
    }
}
