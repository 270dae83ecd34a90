// SPDX-License-Identifier: GPL-3.0-only

//! Scan session lifecycle
//!
//! Ties the pipeline together: frame intake into the bounded queue, the
//! periodic dispatch ticker, per-frame decode tasks, and exactly-once
//! result delivery. A session runs from `start`/`resume` until `stop` or
//! the first successful decode.

pub mod luma;
pub mod queue;
pub(crate) mod scheduler;
pub(crate) mod worker;

use crate::config::ScanConfig;
use crate::decode::{DecodeOutcome, DecoderFactory, Symbol};
use crate::errors::{FrameError, ScanError, ScanResult};
use crate::frame::{FrameId, RawFrame};
use crate::providers::{OrientationProvider, ViewportProvider};
use queue::ScanQueue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Result handler invoked at most once per session, always from the
/// session's single delivery task.
pub type ResultHandler = Box<dyn FnMut(Symbol) + Send>;

/// Lifecycle state of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started yet
    Idle,
    /// Intake, scheduler, and workers are active
    Scanning,
    /// Stopped explicitly or by a successful decode
    Stopped,
}

const STATE_SCANNING: u8 = 0;
const STATE_STOPPED: u8 = 1;

/// Cancellation bookkeeping for one in-flight decode task
pub(crate) struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    pub(crate) fn new(cancelled: Arc<AtomicBool>) -> Self {
        Self { cancelled }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

type OutcomeSender = UnboundedSender<(FrameId, DecodeOutcome)>;

/// State shared by intake, the dispatch ticker, decode tasks, and the
/// delivery task of one session.
pub(crate) struct SessionShared {
    pub(crate) config: ScanConfig,
    state: AtomicU8,
    // Queue and registry are independent lock domains; never acquire one
    // while holding the other.
    queue: Mutex<ScanQueue>,
    tasks: Mutex<HashMap<FrameId, TaskHandle>>,
    pub(crate) scheduler_active: AtomicBool,
    outcomes: Mutex<Option<OutcomeSender>>,
    pub(crate) orientation: Arc<dyn OrientationProvider>,
    pub(crate) viewport: Arc<dyn ViewportProvider>,
    pub(crate) decoder_factory: DecoderFactory,
}

impl SessionShared {
    pub(crate) fn state(&self) -> SessionState {
        if self.state.load(Ordering::SeqCst) == STATE_SCANNING {
            SessionState::Scanning
        } else {
            SessionState::Stopped
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub(crate) fn pop_oldest(&self) -> Option<RawFrame> {
        self.queue.lock().unwrap().pop_oldest()
    }

    pub(crate) fn register_task(&self, id: FrameId, handle: TaskHandle) {
        self.tasks.lock().unwrap().insert(id, handle);
    }

    pub(crate) fn remove_task(&self, id: FrameId) {
        self.tasks.lock().unwrap().remove(&id);
    }

    pub(crate) fn outcome_sender(&self) -> Option<OutcomeSender> {
        self.outcomes.lock().unwrap().clone()
    }

    /// Tear the session down. Idempotent and safe to call from the
    /// delivery path itself.
    ///
    /// Returns true for the caller that actually moved the session out of
    /// Scanning; that caller owns any follow-up (result delivery).
    fn shutdown(&self) -> bool {
        let won = self
            .state
            .compare_exchange(
                STATE_SCANNING,
                STATE_STOPPED,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();

        // Stop scheduling future ticks; a tick in progress is not interrupted
        self.scheduler_active.store(false, Ordering::SeqCst);

        // Flag every in-flight task; each discards its own outcome at
        // delivery time
        let handles: Vec<TaskHandle> = self
            .tasks
            .lock()
            .unwrap()
            .drain()
            .map(|(_, handle)| handle)
            .collect();
        for handle in &handles {
            handle.cancel();
        }

        self.queue.lock().unwrap().clear();

        // Dropping the sender lets the delivery task drain and exit once
        // the last worker finishes
        *self.outcomes.lock().unwrap() = None;

        won
    }
}

enum SessionSlot {
    Idle,
    Active(Arc<SessionShared>),
}

/// Real-time frame intake, scheduling, and decode pipeline.
///
/// Converts an uncontrolled stream of [`RawFrame`]s into at most one
/// decoded [`Symbol`] per session. `start`, `accept`, and `stop` may be
/// called from any thread; decode work runs on the tokio blocking pool and
/// never on the producer's thread.
pub struct Scanner {
    config: ScanConfig,
    orientation: Arc<dyn OrientationProvider>,
    viewport: Arc<dyn ViewportProvider>,
    decoder_factory: DecoderFactory,
    session: Mutex<SessionSlot>,
}

impl Scanner {
    pub fn new(
        config: ScanConfig,
        orientation: Arc<dyn OrientationProvider>,
        viewport: Arc<dyn ViewportProvider>,
        decoder_factory: DecoderFactory,
    ) -> Self {
        Self {
            config,
            orientation,
            viewport,
            decoder_factory,
            session: Mutex::new(SessionSlot::Idle),
        }
    }

    /// Begin a scanning session delivering at most one result to `handler`.
    ///
    /// Must be called from within a tokio runtime. Starting while a session
    /// is already scanning is a configuration error and leaves the running
    /// session untouched.
    pub fn start(&self, handler: ResultHandler) -> ScanResult<()> {
        let mut slot = self.session.lock().unwrap();
        if let SessionSlot::Active(shared) = &*slot
            && shared.state() == SessionState::Scanning
        {
            return Err(ScanError::Configuration(
                "scan session already active".into(),
            ));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(SessionShared {
            config: self.config.clone(),
            state: AtomicU8::new(STATE_SCANNING),
            queue: Mutex::new(ScanQueue::new(self.config.queue_capacity)),
            tasks: Mutex::new(HashMap::new()),
            scheduler_active: AtomicBool::new(false),
            outcomes: Mutex::new(Some(tx)),
            orientation: Arc::clone(&self.orientation),
            viewport: Arc::clone(&self.viewport),
            decoder_factory: Arc::clone(&self.decoder_factory),
        });

        tokio::spawn(deliver_outcomes(Arc::clone(&shared), rx, handler));
        scheduler::ensure_running(&shared);
        *slot = SessionSlot::Active(shared);

        info!(
            queue_capacity = self.config.queue_capacity,
            max_in_flight = self.config.max_in_flight,
            "scan session started"
        );
        Ok(())
    }

    /// Re-arm the full pipeline after a stop. Equivalent to [`Scanner::start`].
    pub fn resume(&self, handler: ResultHandler) -> ScanResult<()> {
        self.start(handler)
    }

    /// Stop the current session: cancel the tick chain and every in-flight
    /// task, clear all pending frames.
    ///
    /// Idempotent, and safe to call from within the result handler.
    pub fn stop(&self) {
        let slot = self.session.lock().unwrap();
        if let SessionSlot::Active(shared) = &*slot
            && shared.shutdown()
        {
            info!("scan session stopped");
        }
    }

    /// Admit a captured frame into the pipeline.
    ///
    /// A no-op (logged, non-fatal) while no session is scanning. Invalid
    /// frames are rejected here rather than faulting a decode task later.
    pub fn accept(&self, frame: RawFrame) {
        let shared = {
            match &*self.session.lock().unwrap() {
                SessionSlot::Active(shared) if shared.state() == SessionState::Scanning => {
                    Arc::clone(shared)
                }
                _ => {
                    debug!(frame = frame.id(), "frame dropped; no active scan session");
                    return;
                }
            }
        };

        if !frame.has_full_luma_plane() {
            let err = if frame.width == 0 || frame.height == 0 {
                FrameError::EmptyDimensions
            } else {
                FrameError::BufferTooShort {
                    expected: frame.luma_len(),
                    actual: frame.data.len(),
                }
            };
            warn!(frame = frame.id(), error = %err, "frame rejected at intake");
            return;
        }

        scheduler::ensure_running(&shared);

        let evicted = shared.queue.lock().unwrap().push(frame);
        if let Some(old) = evicted {
            debug!(frame = old.id(), "oldest pending frame evicted");
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        match &*self.session.lock().unwrap() {
            SessionSlot::Idle => SessionState::Idle,
            SessionSlot::Active(shared) => shared.state(),
        }
    }

    /// Number of frames awaiting dispatch
    pub fn queued(&self) -> usize {
        match &*self.session.lock().unwrap() {
            SessionSlot::Active(shared) => shared.queue.lock().unwrap().len(),
            SessionSlot::Idle => 0,
        }
    }

    /// Number of decode tasks currently in flight
    pub fn in_flight(&self) -> usize {
        match &*self.session.lock().unwrap() {
            SessionSlot::Active(shared) => shared.in_flight(),
            SessionSlot::Idle => 0,
        }
    }
}

/// Single delivery task per session: serializes outcome handling so the
/// external handler is invoked at most once and never concurrently with
/// itself.
async fn deliver_outcomes(
    shared: Arc<SessionShared>,
    mut rx: UnboundedReceiver<(FrameId, DecodeOutcome)>,
    mut handler: ResultHandler,
) {
    while let Some((id, outcome)) = rx.recv().await {
        shared.remove_task(id);
        match outcome {
            DecodeOutcome::Found(symbol) => {
                // First result wins; a Found arriving after the session
                // left Scanning is expected during races, not an error.
                if shared.shutdown() {
                    info!(format = %symbol.format, "symbol decoded; session stopped");
                    handler(symbol);
                } else {
                    debug!(frame = id, "late decode result discarded");
                }
            }
            DecodeOutcome::NotFound => {}
            DecodeOutcome::Aborted => {
                debug!(frame = id, "decode aborted; viewport unavailable");
            }
        }
    }
    debug!("delivery task exited");
}
