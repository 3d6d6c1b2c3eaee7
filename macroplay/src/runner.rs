//! The sequence runner: step-list ownership, looping passes, cooperative
//! cancellation and the status channel.

use crate::errors::PlaybackError;
use crate::events::PlaybackStatus;
use crate::executor::StepExecutor;
use crate::steps::Step;
use crate::surface::InputSurface;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::{debug, info};

/// Lifecycle of the runner, exposed for UI enablement decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
    /// Running, with a cancellation pending at the next step boundary.
    CancelRequested,
}

/// How a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Owns the step list and replays it against an input surface.
///
/// All formerly ambient state lives here: the sequence, the run state, the
/// cancellation flag and the loop toggle. Controls (`request_cancel`,
/// `set_loop_enabled`) may be driven from another task while a run is in
/// flight; structural mutation of the step list is rejected while Running.
pub struct SequencePlayer {
    steps: Arc<Mutex<Vec<Step>>>,
    state: Arc<Mutex<RunState>>,
    cancel_requested: Arc<AtomicBool>,
    loop_enabled: Arc<AtomicBool>,
    status_tx: broadcast::Sender<PlaybackStatus>,
    executor: StepExecutor,
}

impl SequencePlayer {
    pub fn new(surface: Arc<dyn InputSurface>) -> Self {
        let (status_tx, _) = broadcast::channel(64);
        Self {
            steps: Arc::new(Mutex::new(Vec::new())),
            state: Arc::new(Mutex::new(RunState::Idle)),
            cancel_requested: Arc::new(AtomicBool::new(false)),
            loop_enabled: Arc::new(AtomicBool::new(false)),
            executor: StepExecutor::new(surface, status_tx.clone()),
            status_tx,
        }
    }

    fn lock_steps(&self) -> MutexGuard<'_, Vec<Step>> {
        self.steps.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, status: PlaybackStatus) {
        debug!(%status, "playback status");
        let _ = self.status_tx.send(status);
    }

    fn ensure_idle(&self, operation: &str) -> Result<(), PlaybackError> {
        if *self.lock_state() == RunState::Idle {
            Ok(())
        } else {
            Err(PlaybackError::RunnerBusy(format!(
                "cannot {operation} while a sequence is running"
            )))
        }
    }

    /// Get a stream of status updates.
    pub fn status_stream(&self) -> impl Stream<Item = PlaybackStatus> {
        let mut rx = self.status_tx.subscribe();
        Box::pin(async_stream::stream! {
            loop {
                match rx.recv().await {
                    Ok(status) => yield status,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("status stream lagged, skipped {} updates", skipped);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Subscribe to raw status updates without the stream adapter.
    pub fn subscribe_status(&self) -> broadcast::Receiver<PlaybackStatus> {
        self.status_tx.subscribe()
    }

    /// Append a step. Rejected while a run is in flight.
    pub fn push_step(&self, step: Step) -> Result<(), PlaybackError> {
        self.ensure_idle("add a step")?;
        self.lock_steps().push(step);
        Ok(())
    }

    /// Remove the step at `index`. Rejected while a run is in flight.
    pub fn remove_step(&self, index: usize) -> Result<Step, PlaybackError> {
        self.ensure_idle("remove a step")?;
        let mut steps = self.lock_steps();
        if index >= steps.len() {
            return Err(PlaybackError::InvalidArgument(format!(
                "step index {index} out of bounds ({} steps)",
                steps.len()
            )));
        }
        Ok(steps.remove(index))
    }

    /// Drop every queued step. Rejected while a run is in flight.
    pub fn clear_steps(&self) -> Result<(), PlaybackError> {
        self.ensure_idle("clear the sequence")?;
        self.lock_steps().clear();
        Ok(())
    }

    /// Read view of the queued steps, for list rendering.
    pub fn steps(&self) -> Vec<Step> {
        self.lock_steps().clone()
    }

    pub fn set_loop_enabled(&self, enabled: bool) {
        self.loop_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled.load(Ordering::SeqCst)
    }

    pub fn run_state(&self) -> RunState {
        let state = *self.lock_state();
        if state == RunState::Running && self.cancel_requested.load(Ordering::SeqCst) {
            RunState::CancelRequested
        } else {
            state
        }
    }

    /// Request cooperative cancellation of the current run.
    ///
    /// Idempotent and safe to call at any time; only meaningful while
    /// Running. The in-flight step still runs to completion, the flag is
    /// checked at step and round boundaries.
    pub fn request_cancel(&self) {
        let already = self.cancel_requested.swap(true, Ordering::SeqCst);
        if !already && *self.lock_state() == RunState::Running {
            self.emit(PlaybackStatus::CancelRequested);
        }
    }

    /// Replay the queued steps until the pass ends, looping while the loop
    /// toggle stays set and cancellation has not been requested.
    pub async fn run(&self) -> Result<RunOutcome, PlaybackError> {
        {
            let mut state = self.lock_state();
            if *state != RunState::Idle {
                return Err(PlaybackError::RunnerBusy(
                    "a sequence is already running".to_string(),
                ));
            }
            if self.lock_steps().is_empty() {
                self.emit(PlaybackStatus::SequenceEmpty);
                return Err(PlaybackError::EmptySequence);
            }
            self.cancel_requested.store(false, Ordering::SeqCst);
            *state = RunState::Running;
        }

        info!("starting sequence run");
        let mut round: u32 = 1;
        while !self.cancel_requested.load(Ordering::SeqCst) {
            self.emit(PlaybackStatus::RoundStarted { round });
            let snapshot = self.lock_steps().clone();
            for step in &snapshot {
                if self.cancel_requested.load(Ordering::SeqCst) {
                    break;
                }
                self.executor.run_step(step).await;
            }

            if !self.loop_enabled.load(Ordering::SeqCst) {
                break;
            }
            round += 1;
        }

        let cancelled = self.cancel_requested.load(Ordering::SeqCst);
        *self.lock_state() = RunState::Idle;
        let outcome = if cancelled {
            info!(rounds = round, "sequence run cancelled");
            self.emit(PlaybackStatus::Cancelled);
            RunOutcome::Cancelled
        } else {
            info!(rounds = round, "sequence run completed");
            self.emit(PlaybackStatus::Completed);
            RunOutcome::Completed
        };
        Ok(outcome)
    }
}
