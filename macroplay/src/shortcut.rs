//! Shortcut descriptors and the two parsing paths that produce them.

use crate::keys;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Modifier flags captured from a live input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Canonical in-memory representation of a shortcut.
///
/// `key` is a single printable character, a canonical named key such as
/// [`keys::ARROW_UP`], or empty. A descriptor with an empty key is never
/// executable; [`Shortcut::is_executable`] gates on exactly that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub key: String,
}

impl Shortcut {
    /// Build a descriptor from a live key event.
    ///
    /// Returns `None` when the pressed key normalizes to a bare modifier
    /// name or to nothing at all; neither is a committable shortcut.
    pub fn from_key_event(modifiers: Modifiers, raw_key: &str) -> Option<Self> {
        let key = keys::normalize(raw_key);
        if key.is_empty() || keys::is_modifier_name(&key) {
            return None;
        }

        Some(Self {
            ctrl: modifiers.ctrl,
            shift: modifiers.shift,
            alt: modifiers.alt,
            meta: modifiers.meta,
            key,
        })
    }

    /// Parse a free-text shortcut expression such as `Ctrl+Shift+a`.
    ///
    /// Tokens are split on `+`, trimmed, and matched case-insensitively
    /// against the modifier synonyms. Every non-modifier token overwrites
    /// the key slot, so with multiple key tokens the last one wins. When no
    /// token classified as a key at all, the final token is normalized and
    /// used regardless of its classification.
    pub fn from_text(raw: &str) -> Self {
        let tokens: Vec<&str> = raw
            .split('+')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        let mut shortcut = Shortcut::default();
        for token in &tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl = true,
                "shift" => shortcut.shift = true,
                "alt" | "option" => shortcut.alt = true,
                "meta" | "cmd" | "command" | "win" => shortcut.meta = true,
                _ => shortcut.key = keys::normalize(token),
            }
        }

        if shortcut.key.is_empty() {
            if let Some(last) = tokens.last() {
                shortcut.key = keys::normalize(last);
            }
        }

        shortcut
    }

    /// Whether the descriptor carries a key and can be simulated.
    pub fn is_executable(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Canonical display format: modifiers in fixed Ctrl, Shift, Alt, Meta
/// order, `+`-joined, then the key, with the space key rendered as the
/// literal token `Space`.
impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<&str> = Vec::new();
        if self.ctrl {
            segments.push("Ctrl");
        }
        if self.shift {
            segments.push("Shift");
        }
        if self.alt {
            segments.push("Alt");
        }
        if self.meta {
            segments.push("Meta");
        }
        segments.push(if self.key == keys::SPACE {
            "Space"
        } else {
            &self.key
        });
        write!(f, "{}", segments.join("+"))
    }
}
