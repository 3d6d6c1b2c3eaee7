//! Input-macro playback through simulated key events
//!
//! This crate replays a user-composed sequence of input actions (key press,
//! mouse click, timed wait) against a UI surface abstraction, optionally
//! looping, with cooperative cancellation. Key shortcuts are parsed from
//! free text or captured live events into a canonical descriptor, and each
//! simulated press applies the default text/caret/scroll effects a real
//! press would have.
//!
//! The UI layer is an external collaborator: it feeds steps and run
//! controls in, and renders the human-readable progress strings coming back
//! over the status channel.

pub mod errors;
pub mod events;
pub mod executor;
pub mod keys;
pub mod runner;
pub mod shortcut;
pub mod simulator;
pub mod steps;
pub mod surface;
pub mod target;
#[cfg(test)]
mod tests;

pub use errors::PlaybackError;
pub use events::{KeyPhase, MouseButton, PlaybackStatus, SyntheticKeyEvent};
pub use executor::StepExecutor;
pub use runner::{RunOutcome, RunState, SequencePlayer};
pub use shortcut::{Modifiers, Shortcut};
pub use simulator::InputSimulator;
pub use steps::Step;
pub use surface::headless::{HeadlessSurface, HeadlessTarget};
pub use surface::InputSurface;
pub use target::{InputTarget, InputTargetImpl, ScrollBehavior, TargetKind};
