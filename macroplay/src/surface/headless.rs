//! In-memory surface implementation.
//!
//! Stands in for a real page: a neutral root, a set of controls, a focus
//! slot, and per-target scroll offsets. Targets record every dispatched
//! notification and count content changes, which is what the test suite and
//! the CLI inspect after a run.

use crate::errors::PlaybackError;
use crate::events::{KeyPhase, SyntheticKeyEvent};
use crate::surface::InputSurface;
use crate::target::{InputTarget, InputTargetImpl, ScrollBehavior, TargetKind};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct TargetState {
    value: String,
    selection: (usize, usize),
    scroll: (i32, i32),
    suppress_press: bool,
    dispatched: Vec<SyntheticKeyEvent>,
    content_changes: u32,
}

/// A single in-memory element: the root, a plain region, or a text control.
#[derive(Debug, Clone)]
pub struct HeadlessTarget {
    kind: TargetKind,
    label: String,
    state: Arc<Mutex<TargetState>>,
}

impl HeadlessTarget {
    fn new(kind: TargetKind, label: &str, initial: &str) -> Self {
        let caret = initial.chars().count();
        Self {
            kind,
            label: label.to_string(),
            state: Arc::new(Mutex::new(TargetState {
                value: initial.to_string(),
                selection: (caret, caret),
                ..TargetState::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, TargetState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the target's handlers suppress press notifications, the
    /// equivalent of a handler calling prevent-default.
    pub fn set_press_suppressed(&self, suppressed: bool) {
        self.state().suppress_press = suppressed;
    }

    /// Every notification dispatched to this target so far, in order.
    pub fn dispatched_events(&self) -> Vec<SyntheticKeyEvent> {
        self.state().dispatched.clone()
    }

    /// How many content-change notifications the target has fired.
    pub fn content_change_count(&self) -> u32 {
        self.state().content_changes
    }

    /// Accumulated scroll offset of the target's viewport.
    pub fn scroll_offset(&self) -> (i32, i32) {
        self.state().scroll
    }

    /// Current text of the control; empty for non-editable targets.
    pub fn text(&self) -> String {
        self.state().value.clone()
    }

    /// Caret position, the collapsed end of the selection.
    pub fn caret(&self) -> usize {
        self.state().selection.1
    }

    fn unsupported(&self, what: &str) -> PlaybackError {
        PlaybackError::UnsupportedOperation(format!(
            "{what} on non-editable target `{}`",
            self.label
        ))
    }
}

impl InputTargetImpl for HeadlessTarget {
    fn kind(&self) -> TargetKind {
        self.kind
    }

    fn id(&self) -> Option<String> {
        Some(self.label.clone())
    }

    fn dispatch_key(&self, event: &SyntheticKeyEvent) -> bool {
        let mut state = self.state();
        state.dispatched.push(event.clone());
        !(event.phase == KeyPhase::Press && state.suppress_press)
    }

    fn value(&self) -> Result<String, PlaybackError> {
        if !self.kind.is_text_editable() {
            return Err(self.unsupported("value"));
        }
        Ok(self.state().value.clone())
    }

    fn set_value(&self, value: &str) -> Result<(), PlaybackError> {
        if !self.kind.is_text_editable() {
            return Err(self.unsupported("set_value"));
        }
        let mut state = self.state();
        state.value = value.to_string();
        let len = state.value.chars().count();
        state.selection.0 = state.selection.0.min(len);
        state.selection.1 = state.selection.1.min(len);
        Ok(())
    }

    fn selection(&self) -> Result<(usize, usize), PlaybackError> {
        if !self.kind.is_text_editable() {
            return Err(self.unsupported("selection"));
        }
        Ok(self.state().selection)
    }

    fn set_selection(&self, start: usize, end: usize) -> Result<(), PlaybackError> {
        if !self.kind.is_text_editable() {
            return Err(self.unsupported("set_selection"));
        }
        let mut state = self.state();
        let len = state.value.chars().count();
        let start = start.min(len);
        state.selection = (start, end.max(start).min(len));
        Ok(())
    }

    fn notify_content_changed(&self) {
        self.state().content_changes += 1;
    }

    fn scroll_by(&self, dx: i32, dy: i32, _behavior: ScrollBehavior) {
        let mut state = self.state();
        state.scroll.0 += dx;
        state.scroll.1 += dy;
    }
}

/// An in-memory page: neutral root, controls, and a focus slot.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    root: HeadlessTarget,
    controls: Arc<Mutex<Vec<HeadlessTarget>>>,
    focused: Arc<Mutex<Option<HeadlessTarget>>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            root: HeadlessTarget::new(TargetKind::Root, "root", ""),
            controls: Arc::new(Mutex::new(Vec::new())),
            focused: Arc::new(Mutex::new(None)),
        }
    }

    fn add(&self, target: HeadlessTarget) -> HeadlessTarget {
        self.controls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(target.clone());
        target
    }

    /// Add a single-line text control.
    pub fn add_text_input(&self, label: &str, initial: &str) -> HeadlessTarget {
        self.add(HeadlessTarget::new(TargetKind::TextInput, label, initial))
    }

    /// Add a multi-line text control.
    pub fn add_text_area(&self, label: &str, initial: &str) -> HeadlessTarget {
        self.add(HeadlessTarget::new(TargetKind::TextArea, label, initial))
    }

    /// Add a non-editable element with its own scrollable viewport.
    pub fn add_region(&self, label: &str) -> HeadlessTarget {
        self.add(HeadlessTarget::new(TargetKind::Region, label, ""))
    }

    /// Give a control input focus.
    pub fn focus(&self, target: &HeadlessTarget) {
        *self
            .focused
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(target.clone());
    }

    /// Drop focus back to the neutral root.
    pub fn blur(&self) {
        *self
            .focused
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Concrete handle to the neutral root, for assertions.
    pub fn root(&self) -> HeadlessTarget {
        self.root.clone()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSurface for HeadlessSurface {
    fn root_target(&self) -> InputTarget {
        InputTarget::new(Arc::new(self.root.clone()))
    }

    fn focused_target(&self) -> Option<InputTarget> {
        self.focused
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|target| InputTarget::new(Arc::new(target.clone())))
    }
}
