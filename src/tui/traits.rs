//! Interactive trait for components that handle keyboard input
//!
//! The App routes input to whichever component owns the current mode
//! (search box, editor field, table). The component decides whether it
//! consumed the key or whether it should bubble up for global handling.

use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Modal (if open, absorbs everything)
///    │
///    ▼
/// Mode component (search box, editor field, table)
///    │
///    │ Handled::No
///    ▼
/// App (mode keys: Esc, Enter, Tab, q, ...)
/// ```
pub trait Interactive {
    /// Handle a key event
    ///
    /// Returns `Handled::Yes` if the component consumed the event,
    /// `Handled::No` if it should bubble up to the App.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for the status bar while this component has focus
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
