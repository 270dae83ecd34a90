// SPDX-License-Identifier: GPL-3.0-only

use crate::formats::SymbolFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pending-frame queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// Default dispatch tick interval (~30 Hz)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000 / 30;

/// Tuning knobs for a scan session
///
/// The dispatch cadence is intentionally decoupled from the camera frame
/// rate: frames arrive as fast as the capture source produces them, but
/// decode tasks are only started once per tick and only while fewer than
/// `max_in_flight` tasks are running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Capacity of the pending-frame queue. When full, the oldest pending
    /// frame is evicted so the producer is never blocked.
    pub queue_capacity: usize,
    /// Maximum number of concurrently running decode tasks. The dispatch
    /// gate is strict: a new task starts only while the in-flight count is
    /// below this value.
    pub max_in_flight: usize,
    /// Dispatch tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// Symbol formats the decode capability should match
    pub formats: Vec<SymbolFormat>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_in_flight: DEFAULT_QUEUE_CAPACITY,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            formats: SymbolFormat::ALL.to_vec(),
        }
    }
}

impl ScanConfig {
    /// Get the dispatch tick interval as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Replace the symbol-format filter
    pub fn with_formats(mut self, formats: Vec<SymbolFormat>) -> Self {
        self.formats = formats;
        self
    }
}
