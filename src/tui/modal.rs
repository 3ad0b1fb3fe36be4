// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crate::export::ExportScope;
use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Run an export, then close
    Export(ExportScope),
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Export menu; `selected` indexes into `ExportScope::ALL`
    Export { selected: usize },
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn export() -> Self {
        Modal::Export { selected: 0 }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Export { selected } => {
                let count = ExportScope::ALL.len();
                match key {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => ModalAction::Close,
                    KeyCode::Up | KeyCode::Char('k') => {
                        *selected = (*selected + count - 1) % count;
                        ModalAction::None
                    }
                    KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                        *selected = (*selected + 1) % count;
                        ModalAction::None
                    }
                    KeyCode::Enter => ModalAction::Export(ExportScope::ALL[*selected % count]),
                    KeyCode::Char('1') => ModalAction::Export(ExportScope::CurrentPage),
                    KeyCode::Char('2') => ModalAction::Export(ExportScope::AllRecords),
                    _ => ModalAction::None,
                }
            }
        }
    }
}
