// Status bar component
//
// Renders the current mode, the key hints for whatever has focus, and the
// record counts at the bottom.

use crate::tui::app::{App, InputMode};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let (mode, mode_color) = match app.mode {
        InputMode::Normal => ("NORMAL", theme.title),
        InputMode::Search => ("SEARCH", theme.highlight),
        InputMode::Edit => ("EDIT", theme.editing),
    };

    let hint = app.focus_hint();
    let total = app.model.records().len();
    let counts = if app.model.view_state().is_filtering() {
        format!(
            "{} of {} records │ {}/page",
            app.model.matching_records().len(),
            total,
            app.model.page_size()
        )
    } else {
        format!("{} records │ {}/page", total, app.model.page_size())
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(theme.background)
                .bg(mode_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", hint), Style::default().fg(theme.muted)),
        Span::styled(format!("  │ {}", counts), Style::default().fg(theme.status_bar)),
    ]);

    let status = Paragraph::new(line)
        .block(Block::default().borders(Borders::TOP))
        .style(theme.base());

    f.render_widget(status, area);
}
