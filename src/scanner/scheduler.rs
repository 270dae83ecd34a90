// SPDX-License-Identifier: GPL-3.0-only

//! Periodic dispatch ticker
//!
//! Decouples dispatch cadence from the camera frame rate: at most one
//! frame leaves the queue per tick, and only while in-flight work is under
//! the concurrency cap, so dispatch never outruns decode throughput no
//! matter how fast the producer runs.

use super::{SessionShared, SessionState, worker};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// Start the tick chain for this session if it is not already running.
///
/// Idempotent: the `scheduler_active` flag guarantees a single chain per
/// session. Clearing the flag stops the chain after the current tick.
pub(crate) fn ensure_running(shared: &Arc<SessionShared>) {
    if shared.scheduler_active.swap(true, Ordering::SeqCst) {
        return;
    }

    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        debug!(
            interval_ms = shared.config.tick_interval_ms,
            "dispatch ticker started"
        );
        let mut ticker = tokio::time::interval(shared.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick resolves immediately
        ticker.tick().await;

        loop {
            if !shared.scheduler_active.load(Ordering::SeqCst)
                || shared.state() != SessionState::Scanning
            {
                break;
            }
            dispatch_one(&shared);
            ticker.tick().await;
        }
        debug!("dispatch ticker stopped");
    });
}

/// One tick: claim the oldest pending frame when capacity allows.
fn dispatch_one(shared: &Arc<SessionShared>) {
    // Strict gate: a new task starts only below the cap. The registry
    // count is read without touching the queue lock.
    let in_flight = shared.in_flight();
    if in_flight >= shared.config.max_in_flight {
        trace!(in_flight, "dispatch skipped; at concurrency cap");
        return;
    }

    if let Some(frame) = shared.pop_oldest() {
        trace!(frame = frame.id(), in_flight, "dispatching frame");
        worker::spawn_decode(shared, frame);
    }
}
