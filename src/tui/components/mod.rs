// Components module - UI building blocks
//
// - Search bar: app title and the title search box
// - Table panel: the visible page, row selection
// - Editor panel: record detail or the inline editor
// - Pagination bar: prev/next and page buttons
// - Status bar: mode, hints, counts
// - Logs panel: tail of the log buffer
// - Toast: transient notifications
//
// TextInput is shared by the search box and both editor fields.

pub mod editor_panel;
pub mod formatters;
pub mod logs_panel;
pub mod pagination_bar;
pub mod search_bar;
pub mod status_bar;
pub mod table_panel;
pub mod text_input;
pub mod toast;

pub use editor_panel::EditField;
pub use table_panel::TablePanel;
pub use text_input::TextInput;
pub use toast::Toast;

use crate::theme::Theme;

/// What every focus-aware render needs
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub focused: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focused: bool) -> Self {
        Self { theme, focused }
    }
}
