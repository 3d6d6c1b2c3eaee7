//! The UI-surface collaborator: focus resolution over input targets.

use crate::target::InputTarget;

pub mod headless;

/// A surface that can tell the simulator where input currently lands.
pub trait InputSurface: Send + Sync {
    /// The surface's neutral root element.
    fn root_target(&self) -> InputTarget;

    /// The element holding input focus, when it is not the neutral root.
    fn focused_target(&self) -> Option<InputTarget>;

    /// Resolve where a synthetic event should be delivered: the focused
    /// element if there is one, otherwise the neutral root.
    fn event_target(&self) -> InputTarget {
        self.focused_target()
            .unwrap_or_else(|| self.root_target())
    }
}
