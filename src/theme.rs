// Theme support for the TUI
//
// "terminal" uses the terminal's ANSI palette; the named themes use true
// color (RGB). Unknown names fall back to "dark".

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // Terminal colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // UI element colors
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub error: Color,
    pub success: Color,

    // Table colors
    pub header: Color,
    pub selection: Color,
    pub selection_fg: Color,
    /// Row currently open in the editor
    pub editing: Color,

    pub border_type: BorderType,
}

impl Theme {
    pub const NAMES: [&'static str; 3] = ["dark", "light", "terminal"];

    /// Look up a theme by name (case-insensitive)
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "terminal" | "auto" => Self::terminal(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(
                    "Unknown theme '{}' (expected one of {:?}), using dark",
                    other,
                    Self::NAMES
                );
                Self::dark()
            }
        }
    }

    /// One Half Dark
    fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Rgb(40, 44, 52),
            foreground: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(92, 99, 112),
            title: Color::Rgb(86, 182, 194),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(229, 192, 123),
            status_bar: Color::Rgb(220, 223, 228),
            error: Color::Rgb(224, 108, 117),
            success: Color::Rgb(152, 195, 121),
            header: Color::Rgb(97, 175, 239),
            selection: Color::Rgb(71, 78, 93),
            selection_fg: Color::Rgb(220, 223, 228),
            editing: Color::Rgb(198, 120, 221),
            border_type: BorderType::Rounded,
        }
    }

    /// One Half Light
    fn light() -> Self {
        Self {
            name: "light",
            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            muted: Color::Rgb(160, 161, 167),
            title: Color::Rgb(1, 132, 188),
            border: Color::Rgb(160, 161, 167),
            highlight: Color::Rgb(193, 132, 1),
            status_bar: Color::Rgb(56, 58, 66),
            error: Color::Rgb(228, 86, 73),
            success: Color::Rgb(80, 161, 79),
            header: Color::Rgb(64, 120, 242),
            selection: Color::Rgb(229, 229, 230),
            selection_fg: Color::Rgb(56, 58, 66),
            editing: Color::Rgb(166, 38, 164),
            border_type: BorderType::Rounded,
        }
    }

    /// ANSI palette, terminal background
    fn terminal() -> Self {
        Self {
            name: "terminal",
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            highlight: Color::Yellow,
            status_bar: Color::Gray,
            error: Color::Red,
            success: Color::Green,
            header: Color::Blue,
            selection: Color::DarkGray,
            selection_fg: Color::White,
            editing: Color::Magenta,
            border_type: BorderType::Plain,
        }
    }

    /// Base style for panels
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection)
    }

    /// Border color for a panel based on focus state
    pub fn panel_border(&self, focused: bool) -> Color {
        if focused {
            self.highlight
        } else {
            self.border
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
