//! Key-name normalization.
//!
//! Raw key tokens arrive from two places: free text typed by the user and
//! key names captured from a live input event. Both funnel through
//! [`normalize`] so the rest of the crate only ever sees canonical names.

/// Canonical named keys produced by the alias table.
pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";
pub const ESCAPE: &str = "Escape";
pub const DELETE: &str = "Delete";
/// The space key is represented by the literal character, not a name.
pub const SPACE: &str = " ";

/// A directional arrow key, extracted from a canonical key name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// Normalize a raw key token to its canonical form.
///
/// Whitespace is trimmed and an empty token stays empty. Known aliases
/// (direction words, arrow symbols, `esc`, `del`, `space`) map to their
/// canonical names case-insensitively. A single character is returned
/// unchanged with its case preserved. Any other token gets its first letter
/// uppercased and is otherwise passed through, which covers freeform names
/// like `enter` or `f5`.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(canonical) = alias(&trimmed.to_lowercase()) {
        return canonical.to_string();
    }

    if trimmed.chars().count() == 1 {
        return trimmed.to_string();
    }

    let mut chars = trimmed.chars();
    let mut capitalized = String::with_capacity(trimmed.len());
    if let Some(first) = chars.next() {
        capitalized.extend(first.to_uppercase());
    }
    capitalized.push_str(chars.as_str());
    capitalized
}

fn alias(lower: &str) -> Option<&'static str> {
    match lower {
        "up" | "arrowup" | "↑" => Some(ARROW_UP),
        "down" | "arrowdown" | "↓" => Some(ARROW_DOWN),
        "left" | "arrowleft" | "←" => Some(ARROW_LEFT),
        "right" | "arrowright" | "→" => Some(ARROW_RIGHT),
        "esc" => Some(ESCAPE),
        "del" => Some(DELETE),
        "space" => Some(SPACE),
        _ => None,
    }
}

/// Whether a canonical key name is a bare modifier.
///
/// A lone modifier press is not a committable shortcut.
pub fn is_modifier_name(key: &str) -> bool {
    matches!(key, "Control" | "Shift" | "Alt" | "Meta")
}

/// Extract the arrow direction from a canonical key name, if any.
pub fn arrow_key(key: &str) -> Option<ArrowKey> {
    match key {
        ARROW_UP => Some(ArrowKey::Up),
        ARROW_DOWN => Some(ArrowKey::Down),
        ARROW_LEFT => Some(ArrowKey::Left),
        ARROW_RIGHT => Some(ArrowKey::Right),
        _ => None,
    }
}
