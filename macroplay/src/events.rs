//! Synthetic input notifications and playback progress events.

use crate::errors::PlaybackError;
use crate::shortcut::Shortcut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a synthetic key notification models the press or the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPhase {
    Press,
    Release,
}

/// A synthetic key notification dispatched to an input target.
///
/// Press notifications are cancelable: the target's dispatch verdict decides
/// whether default key effects are applied. Release notifications never gate
/// anything; their verdict is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticKeyEvent {
    pub phase: KeyPhase,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub key: String,
}

impl SyntheticKeyEvent {
    pub fn press(shortcut: &Shortcut) -> Self {
        Self::with_phase(KeyPhase::Press, shortcut)
    }

    pub fn release(shortcut: &Shortcut) -> Self {
        Self::with_phase(KeyPhase::Release, shortcut)
    }

    fn with_phase(phase: KeyPhase, shortcut: &Shortcut) -> Self {
        Self {
            phase,
            ctrl: shortcut.ctrl,
            shift: shortcut.shift,
            alt: shortcut.alt,
            meta: shortcut.meta,
            key: shortcut.key.clone(),
        }
    }
}

/// Mouse button carried by a mouse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MouseButton {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "right" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            other => Err(PlaybackError::InvalidArgument(format!(
                "unknown mouse button `{other}`"
            ))),
        }
    }
}

/// Progress event emitted over the status channel.
///
/// The `Display` impl renders each event as the human-readable progress
/// string an external display sink is expected to show. Content and cadence
/// are the contract; exact phrasing is presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// A full pass over the step list is starting.
    RoundStarted { round: u32 },
    /// A key step is being simulated.
    PressingKey { shortcut: String },
    /// A key step's text did not parse to an executable shortcut.
    InvalidShortcut { input: String },
    /// A mouse step is being simulated.
    ClickingMouse { button: MouseButton },
    /// A wait step is suspending the run.
    Waiting { duration_ms: u64 },
    /// Cancellation was requested; the run stops at the next step boundary.
    CancelRequested,
    /// A run was requested with no steps queued.
    SequenceEmpty,
    Completed,
    Cancelled,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackStatus::RoundStarted { round } => write!(f, "round {round}"),
            PlaybackStatus::PressingKey { shortcut } => write!(f, "pressing {shortcut}"),
            PlaybackStatus::InvalidShortcut { input } => {
                write!(f, "invalid shortcut: {input}")
            }
            PlaybackStatus::ClickingMouse { button } => {
                write!(f, "clicking {button} button")
            }
            PlaybackStatus::Waiting { duration_ms } => write!(f, "waiting {duration_ms}ms"),
            PlaybackStatus::CancelRequested => write!(f, "cancel requested"),
            PlaybackStatus::SequenceEmpty => write!(f, "sequence is empty"),
            PlaybackStatus::Completed => write!(f, "completed"),
            PlaybackStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}
