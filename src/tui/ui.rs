// Frame layout
//
// ┌ search bar ───────────────────────────────────────┐
// │ table (page)                 │ detail / editor     │
// ├ pagination ───────────────────────────────────────┤
// │ logs (optional)                                    │
// └ status bar ───────────────────────────────────────┘
//
// Modals and the toast are drawn last, on top.

use super::app::{App, InputMode};
use super::components::{
    editor_panel, logs_panel, pagination_bar, search_bar, status_bar, RenderContext,
};
use super::modal::Modal;
use crate::export::ExportScope;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const LOGS_HEIGHT: u16 = 8;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    f.render_widget(Block::default().style(app.theme.base()), area);

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(1),
    ];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let theme = &app.theme;
    let snapshot = app.model.snapshot();

    search_bar::render(
        f,
        chunks[0],
        &app.source_label,
        &app.search,
        &RenderContext::new(theme, app.mode == InputMode::Search),
    );

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    app.table.render(
        f,
        main[0],
        &snapshot,
        app.fetcher.state(),
        app.spinner(),
        &RenderContext::new(theme, app.mode == InputMode::Normal),
    );

    match app.model.edit_session().editing_id() {
        Some(id) if app.mode == InputMode::Edit => editor_panel::render_editor(
            f,
            main[1],
            id,
            &app.title_input,
            &app.body_input,
            app.edit_field,
            theme,
        ),
        _ => editor_panel::render_detail(
            f,
            main[1],
            app.selected_record(),
            &RenderContext::new(theme, false),
        ),
    }

    pagination_bar::render(f, chunks[2], &snapshot, theme);

    let status_area = if app.show_logs {
        logs_panel::render(f, chunks[3], &app.log_buffer, theme);
        chunks[4]
    } else {
        chunks[3]
    };
    status_bar::render(f, status_area, app);

    if let Some(modal) = &app.modal {
        draw_modal(f, area, modal, app);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, area, theme);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn draw_modal(f: &mut Frame, area: Rect, modal: &Modal, app: &App) {
    let theme = &app.theme;
    let key = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    let (title, lines, width) = match modal {
        Modal::Help => {
            let rows = [
                ("↑↓ j k", "select row"),
                ("←→ h l", "previous / next page"),
                ("g G", "first / last page"),
                ("1-9", "go to page"),
                ("/", "search titles (Enter keeps, Esc clears)"),
                ("Enter e", "edit selected record"),
                ("Tab", "switch title / body while editing"),
                ("Enter", "save edit"),
                ("Esc", "cancel edit"),
                ("x", "export to .xlsx"),
                ("y", "copy record as JSON"),
                ("L", "toggle logs"),
                ("q", "quit"),
            ];
            let lines: Vec<Line> = rows
                .iter()
                .map(|(k, what)| {
                    Line::from(vec![
                        Span::styled(format!(" {:<9}", k), key),
                        Span::raw(*what),
                    ])
                })
                .collect();
            (" Help ", lines, 56)
        }
        Modal::Export { selected } => {
            let mut lines = vec![Line::from("")];
            for (i, scope) in ExportScope::ALL.iter().enumerate() {
                let label = format!(" {}. {}  ({}.xlsx) ", i + 1, scope.label(), scope.filename());
                let style = if i == *selected {
                    theme.selected_style().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground)
                };
                lines.push(Line::styled(label, style));
            }
            lines.push(Line::from(""));
            lines.push(Line::styled(
                format!(" → {}", export_counts(app)),
                Style::default().fg(theme.muted),
            ));
            (" Export ", lines, 48)
        }
    };

    let height = lines.len() as u16 + 2;
    let modal_area = centered(area, width.min(area.width), height.min(area.height));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .title(title)
        .style(theme.base());

    f.render_widget(Clear, modal_area);
    f.render_widget(Paragraph::new(lines).block(block), modal_area);
}

fn export_counts(app: &App) -> String {
    let snapshot = app.model.snapshot();
    format!(
        "{} on this page, {} total",
        snapshot.visible_records.len(),
        app.model.records().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::loaded_app;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_fetch_shows_no_results() {
        let (app, _) = loaded_app(0);
        let text = screen(&app);
        assert!(text.contains("No results found."));
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn test_search_without_matches_shows_no_results() {
        let (mut app, _) = loaded_app(30);
        app.search.set_value("zzzz");
        app.apply_search();
        let text = screen(&app);
        assert!(text.contains("No results found."));
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn test_tiny_terminal_with_toast_draws() {
        let (mut app, _) = loaded_app(20);
        app.show_error("✗ Title cannot be empty");
        let mut terminal = Terminal::new(TestBackend::new(5, 2)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
