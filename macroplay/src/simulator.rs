//! Key-event simulation against a focus-resolved target.
//!
//! Given a shortcut expression, the simulator dispatches a cancelable press
//! notification, applies the default key effects when the press was not
//! suppressed, then dispatches the release. The fixed delays model
//! human-perceptible press/release timing and are not configurable.

use crate::errors::PlaybackError;
use crate::events::{PlaybackStatus, SyntheticKeyEvent};
use crate::keys::{self, ArrowKey};
use crate::shortcut::Shortcut;
use crate::surface::InputSurface;
use crate::target::{InputTarget, ScrollBehavior};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Settle delay after reporting an unparseable shortcut.
const INVALID_SHORTCUT_SETTLE: Duration = Duration::from_millis(350);
/// Hold time between press and release.
const KEY_HOLD: Duration = Duration::from_millis(80);
/// Settle delay after the release.
const RELEASE_SETTLE: Duration = Duration::from_millis(180);
/// Viewport scroll distance per arrow key, in pixels.
const SCROLL_STEP: i32 = 50;

/// Simulates one shortcut against whatever currently holds focus.
pub struct InputSimulator {
    surface: Arc<dyn InputSurface>,
    status_tx: broadcast::Sender<PlaybackStatus>,
}

impl InputSimulator {
    pub fn new(surface: Arc<dyn InputSurface>, status_tx: broadcast::Sender<PlaybackStatus>) -> Self {
        Self { surface, status_tx }
    }

    fn emit(&self, status: PlaybackStatus) {
        debug!(%status, "playback status");
        let _ = self.status_tx.send(status);
    }

    /// Parse and simulate a shortcut expression.
    ///
    /// An expression that does not parse to an executable descriptor is
    /// reported as a failure and completes after its settle delay without
    /// touching any target; the caller treats the step as done either way.
    pub async fn execute_shortcut_text(&self, raw: &str) {
        let shortcut = Shortcut::from_text(raw);
        if !shortcut.is_executable() {
            warn!(input = raw, "shortcut has no executable key");
            self.emit(PlaybackStatus::InvalidShortcut {
                input: raw.to_string(),
            });
            sleep(INVALID_SHORTCUT_SETTLE).await;
            return;
        }

        self.emit(PlaybackStatus::PressingKey {
            shortcut: shortcut.to_string(),
        });

        let target = self.surface.event_target();
        let propagated = target.dispatch_key(&SyntheticKeyEvent::press(&shortcut));
        if propagated {
            if let Err(err) = apply_default_effects(&target, &shortcut) {
                warn!(%err, key = %shortcut.key, "default key effect failed");
            }
        } else {
            debug!(key = %shortcut.key, "press suppressed by target handler");
        }

        sleep(KEY_HOLD).await;
        target.dispatch_key(&SyntheticKeyEvent::release(&shortcut));
        sleep(RELEASE_SETTLE).await;
    }
}

/// Apply the default effect of an unsuppressed press.
///
/// Arrow keys move the caret inside text-editable targets and scroll the
/// viewport of anything else; a single printable character is inserted at
/// the selection of a text-editable target; every other key has no default
/// effect beyond the dispatch itself.
fn apply_default_effects(target: &InputTarget, shortcut: &Shortcut) -> Result<(), PlaybackError> {
    if let Some(arrow) = keys::arrow_key(&shortcut.key) {
        if target.is_text_editable() {
            return move_caret(target, arrow);
        }
        let (dx, dy) = match arrow {
            ArrowKey::Up => (0, -SCROLL_STEP),
            ArrowKey::Down => (0, SCROLL_STEP),
            ArrowKey::Left => (-SCROLL_STEP, 0),
            ArrowKey::Right => (SCROLL_STEP, 0),
        };
        target.scroll_by(dx, dy, ScrollBehavior::Smooth);
        return Ok(());
    }

    if shortcut.key.chars().count() == 1 && target.is_text_editable() {
        return insert_text(target, &shortcut.key);
    }

    Ok(())
}

fn move_caret(target: &InputTarget, arrow: ArrowKey) -> Result<(), PlaybackError> {
    let (_, caret) = target.selection()?;
    let value = target.value()?;

    let next = match arrow {
        ArrowKey::Left => caret.saturating_sub(1),
        ArrowKey::Right => (caret + 1).min(value.chars().count()),
        ArrowKey::Up | ArrowKey::Down => {
            // Vertical movement needs line structure; single-line controls
            // have none.
            if !target.is_multiline() {
                return Ok(());
            }
            match vertical_caret(&value, caret, arrow) {
                Some(next) => next,
                None => return Ok(()),
            }
        }
    };

    target.set_selection(next, next)
}

/// Move the caret one visual line up or down, preserving the column and
/// clamping to the destination line's length. Lines are newline-delimited;
/// movement past the first or last line is a no-op (`None`).
fn vertical_caret(value: &str, caret: usize, arrow: ArrowKey) -> Option<usize> {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    let caret = caret.min(len);

    let line_start = chars[..caret]
        .iter()
        .rposition(|&c| c == '\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let line_end = chars[caret..]
        .iter()
        .position(|&c| c == '\n')
        .map(|i| caret + i)
        .unwrap_or(len);
    let column = caret - line_start;

    match arrow {
        ArrowKey::Up => {
            if line_start == 0 {
                return None;
            }
            let prev_line_end = line_start - 1;
            let prev_line_start = chars[..prev_line_end]
                .iter()
                .rposition(|&c| c == '\n')
                .map(|i| i + 1)
                .unwrap_or(0);
            let prev_line_len = prev_line_end - prev_line_start;
            Some(prev_line_start + column.min(prev_line_len))
        }
        ArrowKey::Down => {
            if line_end >= len {
                return None;
            }
            let next_line_start = line_end + 1;
            let next_line_end = chars[next_line_start..]
                .iter()
                .position(|&c| c == '\n')
                .map(|i| next_line_start + i)
                .unwrap_or(len);
            let next_line_len = next_line_end - next_line_start;
            Some(next_line_start + column.min(next_line_len))
        }
        ArrowKey::Left | ArrowKey::Right => None,
    }
}

/// Replace the current selection with `text`, put the caret after it and
/// fire the content-changed notification.
fn insert_text(target: &InputTarget, text: &str) -> Result<(), PlaybackError> {
    let (start, end) = target.selection()?;
    let value = target.value()?;

    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    let start = start.min(len);
    let end = end.max(start).min(len);

    let mut next: String = chars[..start].iter().collect();
    next.push_str(text);
    next.extend(&chars[end..]);

    target.set_value(&next)?;
    let caret = start + text.chars().count();
    target.set_selection(caret, caret)?;
    target.notify_content_changed();
    Ok(())
}
