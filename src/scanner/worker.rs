// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame decode task
//!
//! Orientation correction, cropping, and up to two decode attempts (normal
//! plus inverted luminance) per frame, isolated so a fault while processing
//! one frame never affects the pool or other frames.

use super::{SessionShared, TaskHandle, luma};
use crate::decode::{DecodeOutcome, Decoder};
use crate::formats::SymbolFormat;
use crate::frame::RawFrame;
use crate::providers::{DeviceOrientation, OrientationProvider, ViewportProvider};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Spawn the decode task for a claimed frame and register it for
/// cancellation bookkeeping.
pub(crate) fn spawn_decode(shared: &Arc<SessionShared>, frame: RawFrame) {
    let id = frame.id();
    let cancelled = Arc::new(AtomicBool::new(false));
    shared.register_task(id, TaskHandle::new(Arc::clone(&cancelled)));

    let Some(outcomes) = shared.outcome_sender() else {
        // Session stopped between dispatch and spawn
        shared.remove_task(id);
        return;
    };

    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        let outcome = run_decode(&shared, frame).await;

        // Cooperative cancellation: a running decode is allowed to finish;
        // it is its delivery that gets suppressed.
        if cancelled.load(Ordering::SeqCst) {
            trace!(frame = id, "cancelled task discarding outcome");
            shared.remove_task(id);
            return;
        }
        if outcomes.send((id, outcome)).is_err() {
            shared.remove_task(id);
        }
    });
}

/// Run the CPU-bound portion on the blocking pool. A panic anywhere in the
/// steps is confined to this frame and reported as a plain miss.
async fn run_decode(shared: &Arc<SessionShared>, frame: RawFrame) -> DecodeOutcome {
    let orientation = Arc::clone(&shared.orientation);
    let viewport = Arc::clone(&shared.viewport);
    let mut decoder = (shared.decoder_factory)();
    let formats = shared.config.formats.clone();

    tokio::task::spawn_blocking(move || {
        decode_sync(
            &frame,
            orientation.as_ref(),
            viewport.as_ref(),
            decoder.as_mut(),
            &formats,
        )
    })
    .await
    .unwrap_or_else(|e| {
        warn!(error = %e, "decode task panicked");
        DecodeOutcome::NotFound
    })
}

/// Synchronous decode steps for one frame.
pub(crate) fn decode_sync(
    frame: &RawFrame,
    orientation: &dyn OrientationProvider,
    viewport: &dyn ViewportProvider,
    decoder: &mut dyn Decoder,
    formats: &[SymbolFormat],
) -> DecodeOutcome {
    let started = Instant::now();
    let mut width = frame.width;
    let mut height = frame.height;

    // Orientation correction: rotate the buffer upright in portrait,
    // swapping the dimension bookkeeping on odd quarter-turn counts.
    let data = if orientation.orientation() == DeviceOrientation::Portrait {
        let turns = orientation.quarter_turns() % 4;
        let rotated = luma::rotate_quarter_turns(&frame.data, width, height, turns);
        if turns % 2 == 1 {
            std::mem::swap(&mut width, &mut height);
        }
        rotated
    } else {
        frame.data.to_vec()
    };

    let Some(rect) = viewport.viewport(width, height) else {
        debug!(frame = frame.id(), "no viewport rect; frame skipped");
        return DecodeOutcome::Aborted;
    };
    let Some(region) = luma::crop(&data, width, height, &rect) else {
        warn!(
            frame = frame.id(),
            ?rect,
            width,
            height,
            "viewport rect outside frame"
        );
        return DecodeOutcome::NotFound;
    };

    // First attempt, then a single retry on inverted luminance to catch
    // inverted-polarity symbols. The decoder is reset after each attempt.
    let mut symbol = decoder.decode(&region, formats);
    decoder.reset();
    if symbol.is_none() {
        symbol = decoder.decode(&luma::invert(&region), formats);
        decoder.reset();
    }

    match symbol {
        Some(symbol) => {
            debug!(
                frame = frame.id(),
                format = %symbol.format,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "symbol decoded"
            );
            DecodeOutcome::Found(symbol)
        }
        None => {
            trace!(
                frame = frame.id(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "no symbol in frame"
            );
            DecodeOutcome::NotFound
        }
    }
}
