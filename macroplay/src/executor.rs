//! Execution of a single queued step.

use crate::events::PlaybackStatus;
use crate::simulator::InputSimulator;
use crate::steps::Step;
use crate::surface::InputSurface;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::debug;

/// Settle delay after reporting a simulated mouse click.
const MOUSE_SETTLE: Duration = Duration::from_millis(350);

/// Dispatches one step to the simulator or a timed delay.
pub struct StepExecutor {
    simulator: InputSimulator,
    status_tx: broadcast::Sender<PlaybackStatus>,
}

impl StepExecutor {
    pub fn new(surface: Arc<dyn InputSurface>, status_tx: broadcast::Sender<PlaybackStatus>) -> Self {
        Self {
            simulator: InputSimulator::new(surface, status_tx.clone()),
            status_tx,
        }
    }

    fn emit(&self, status: PlaybackStatus) {
        debug!(%status, "playback status");
        let _ = self.status_tx.send(status);
    }

    /// Run one step to completion.
    pub async fn run_step(&self, step: &Step) {
        match step {
            Step::Key { shortcut } => self.simulator.execute_shortcut_text(shortcut).await,
            Step::Mouse { button } => {
                self.emit(PlaybackStatus::ClickingMouse { button: *button });
                sleep(MOUSE_SETTLE).await;
            }
            Step::Wait { duration_ms } => {
                self.emit(PlaybackStatus::Waiting {
                    duration_ms: *duration_ms,
                });
                sleep(Duration::from_millis(*duration_ms)).await;
            }
        }
    }
}
