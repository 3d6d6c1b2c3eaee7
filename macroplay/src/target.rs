//! The input-target abstraction the simulator dispatches against.
//!
//! [`InputTarget`] wraps a shared [`InputTargetImpl`] the way a handle wraps
//! a platform element: the simulator talks to the wrapper, concrete surfaces
//! implement the trait. The `dispatch_key` verdict is the propagate gate
//! that decouples default-effect handling from any concrete event system.

use crate::errors::PlaybackError;
use crate::events::SyntheticKeyEvent;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// What kind of element a target is, which decides its default key effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// The surface's neutral root; receives events when nothing is focused.
    Root,
    /// A focusable, non-editable element with a scrollable viewport.
    Region,
    /// A single-line text-editable control.
    TextInput,
    /// A multi-line text-editable control.
    TextArea,
}

impl TargetKind {
    pub fn is_text_editable(self) -> bool {
        matches!(self, TargetKind::TextInput | TargetKind::TextArea)
    }

    pub fn is_multiline(self) -> bool {
        self == TargetKind::TextArea
    }
}

/// Scroll animation hint forwarded to the target's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// The capabilities a concrete surface element must provide.
///
/// Text and selection offsets are measured in characters. Operations that a
/// target kind cannot support (selection on a non-text element) return
/// [`PlaybackError::UnsupportedOperation`].
pub trait InputTargetImpl: Send + Sync + Debug {
    fn kind(&self) -> TargetKind;

    fn id(&self) -> Option<String>;

    /// Deliver a synthetic key notification to the element's handlers.
    ///
    /// Returns `false` when a handler suppressed the default action. Only
    /// press notifications are gated on this; callers ignore the verdict
    /// for releases.
    fn dispatch_key(&self, event: &SyntheticKeyEvent) -> bool;

    fn value(&self) -> Result<String, PlaybackError>;

    fn set_value(&self, value: &str) -> Result<(), PlaybackError>;

    fn selection(&self) -> Result<(usize, usize), PlaybackError>;

    fn set_selection(&self, start: usize, end: usize) -> Result<(), PlaybackError>;

    /// Notify content-change observers, the equivalent of an input event.
    fn notify_content_changed(&self);

    /// Scroll the element's nearest scrollable viewport by a pixel delta.
    fn scroll_by(&self, dx: i32, dy: i32, behavior: ScrollBehavior);
}

/// Handle to a surface element the simulator can act on.
#[derive(Debug, Clone)]
pub struct InputTarget {
    inner: Arc<dyn InputTargetImpl>,
}

impl InputTarget {
    pub fn new(inner: Arc<dyn InputTargetImpl>) -> Self {
        Self { inner }
    }

    pub fn kind(&self) -> TargetKind {
        self.inner.kind()
    }

    pub fn id(&self) -> Option<String> {
        self.inner.id()
    }

    pub fn is_text_editable(&self) -> bool {
        self.inner.kind().is_text_editable()
    }

    pub fn is_multiline(&self) -> bool {
        self.inner.kind().is_multiline()
    }

    pub fn dispatch_key(&self, event: &SyntheticKeyEvent) -> bool {
        self.inner.dispatch_key(event)
    }

    pub fn value(&self) -> Result<String, PlaybackError> {
        self.inner.value()
    }

    pub fn set_value(&self, value: &str) -> Result<(), PlaybackError> {
        self.inner.set_value(value)
    }

    pub fn selection(&self) -> Result<(usize, usize), PlaybackError> {
        self.inner.selection()
    }

    pub fn set_selection(&self, start: usize, end: usize) -> Result<(), PlaybackError> {
        self.inner.set_selection(start, end)
    }

    pub fn notify_content_changed(&self) {
        self.inner.notify_content_changed()
    }

    pub fn scroll_by(&self, dx: i32, dy: i32, behavior: ScrollBehavior) {
        self.inner.scroll_by(dx, dy, behavior)
    }
}
