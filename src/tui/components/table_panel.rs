//! Record table component
//!
//! Renders the visible page of a [`ViewSnapshot`] as an id/title/body table
//! and owns the row selection within that page. The fetch state decides what
//! fills the panel before there is data: a spinner while loading, the error
//! message after a failure.

use super::formatters::{single_line, truncate_to_width};
use super::RenderContext;
use crate::engine::{FetchState, ViewSnapshot};
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

const ID_WIDTH: u16 = 6;
const TITLE_PERCENT: u16 = 40;

/// Row selection within the current page
#[derive(Debug, Default)]
pub struct TablePanel {
    selected: usize,
    rows: usize,
}

impl TablePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Sync with the number of rows on the page, clamping the selection
    pub fn set_row_count(&mut self, rows: usize) {
        self.rows = rows;
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    /// Back to the first row (page or search changed)
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    #[cfg(test)]
    pub fn select(&mut self, row: usize) {
        self.selected = row.min(self.rows.saturating_sub(1));
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.rows {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        snapshot: &ViewSnapshot<'_>,
        fetch: &FetchState,
        spinner: &str,
        ctx: &RenderContext<'_>,
    ) {
        let theme = ctx.theme;
        let focused = ctx.focused;
        let title = if snapshot.is_filtering {
            format!(" Records ({} matching) ", snapshot.matching)
        } else {
            format!(" Records ({}) ", snapshot.matching)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(focused)))
            .title(title)
            .style(theme.base());

        match fetch {
            FetchState::Idle | FetchState::Loading => {
                let text = if fetch.loading() {
                    format!("{} Loading records...", spinner)
                } else {
                    "Waiting for a request...".to_string()
                };
                let p = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.muted))
                    .block(block);
                f.render_widget(p, area);
                return;
            }
            FetchState::Failed(message) => {
                let lines = vec![
                    Line::styled(
                        "Failed to load records",
                        Style::default()
                            .fg(theme.error)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::from(""),
                    Line::styled(message.clone(), Style::default().fg(theme.error)),
                ];
                let p = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(block);
                f.render_widget(p, area);
                return;
            }
            FetchState::Ready(_) => {}
        }

        // Column budget: borders (2) + two column gaps (2)
        let inner = area.width.saturating_sub(2 + 2 + ID_WIDTH) as usize;
        let title_width = inner * TITLE_PERCENT as usize / 100;
        let body_width = inner.saturating_sub(title_width);

        let header = Row::new(vec!["id", "title", "body"]).style(theme.header_style());

        let rows: Vec<Row> = if snapshot.is_empty() {
            vec![Row::new(vec![
                Cell::from(""),
                Cell::from("No results found."),
                Cell::from(""),
            ])
            .style(Style::default().fg(theme.muted))]
        } else {
            snapshot
                .visible_records
                .iter()
                .map(|record| {
                    let editing = snapshot.editing_id == Some(record.id);
                    let id = if editing {
                        format!("✎{}", record.id)
                    } else {
                        record.id.to_string()
                    };
                    let row = Row::new(vec![
                        Cell::from(id),
                        Cell::from(truncate_to_width(&single_line(&record.title), title_width)),
                        Cell::from(truncate_to_width(&single_line(&record.body), body_width)),
                    ]);
                    if editing {
                        row.style(Style::default().fg(theme.editing))
                    } else {
                        row
                    }
                })
                .collect()
        };

        let widths = [
            Constraint::Length(ID_WIDTH),
            Constraint::Percentage(TITLE_PERCENT),
            Constraint::Fill(1),
        ];

        let highlight = if focused {
            theme.selected_style().add_modifier(Modifier::BOLD)
        } else {
            theme.selected_style()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(highlight);

        let mut state = TableState::default();
        if !snapshot.is_empty() {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(table, area, &mut state);
    }
}

impl Interactive for TablePanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:row  Enter:edit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TableModel;
    use crate::model::Record;
    use crate::theme::Theme;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_text(model: &TableModel, fetch: &FetchState) -> String {
        let theme = Theme::default();
        let panel = TablePanel::new();
        let snapshot = model.snapshot();
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| {
                let ctx = RenderContext::new(&theme, true);
                panel.render(f, f.area(), &snapshot, fetch, "⠋", &ctx);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_selection_stays_in_page() {
        let mut panel = TablePanel::new();
        panel.set_row_count(3);
        for _ in 0..5 {
            panel.handle_key(key(KeyCode::Down));
        }
        assert_eq!(panel.selected(), 2);

        panel.handle_key(key(KeyCode::Char('k')));
        assert_eq!(panel.selected(), 1);
    }

    #[test]
    fn test_shrinking_page_clamps_selection() {
        let mut panel = TablePanel::new();
        panel.set_row_count(15);
        panel.select(14);
        panel.set_row_count(4);
        assert_eq!(panel.selected(), 3);

        panel.set_row_count(0);
        assert_eq!(panel.selected(), 0);
    }

    #[test]
    fn test_empty_page_renders_no_results_row() {
        let model = TableModel::new(15);
        let text = render_text(&model, &FetchState::Ready(Vec::new()));
        assert!(text.contains("No results found."));

        let mut model = TableModel::new(15);
        model.load(vec![Record::new(1, "alpha", "one"), Record::new(2, "beta", "two")]);
        model.set_search_term("zzzz");
        let text = render_text(&model, &FetchState::Ready(Vec::new()));
        assert!(text.contains("No results found."));
        assert!(!text.contains("alpha"));
    }

    #[test]
    fn test_loading_and_failure_states() {
        let model = TableModel::new(15);
        assert!(render_text(&model, &FetchState::Loading).contains("Loading records..."));

        let failed = FetchState::Failed("HTTP 500".to_string());
        let text = render_text(&model, &failed);
        assert!(text.contains("Failed to load records"));
        assert!(text.contains("HTTP 500"));
    }

    #[test]
    fn test_other_keys_bubble() {
        let mut panel = TablePanel::new();
        assert_eq!(panel.handle_key(key(KeyCode::Enter)), Handled::No);
        assert_eq!(panel.handle_key(key(KeyCode::Right)), Handled::No);
    }
}
