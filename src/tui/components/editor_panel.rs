//! Side panel: record detail, or the inline editor while a session is open
//!
//! Not editing: shows the selected record in full (title and body wrapped).
//! Editing: shows the two inputs with char counters; the focused field is
//! bordered in the highlight color.

use super::text_input::TextInput;
use super::RenderContext;
use crate::model::{Record, RecordId};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Which editor input receives typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Title,
    Body,
}

impl EditField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Title => Self::Body,
            Self::Body => Self::Title,
        }
    }
}

/// Render the read-only detail view of `record`
pub fn render_detail(f: &mut Frame, area: Rect, record: Option<&Record>, ctx: &RenderContext<'_>) {
    let theme = ctx.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Detail ")
        .style(theme.base());

    let Some(record) = record else {
        let p = Paragraph::new("No record selected")
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let label = Style::default()
        .fg(theme.header)
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("id ", label),
            Span::raw(record.id.to_string()),
        ]),
        Line::from(""),
        Line::styled("title", label),
        Line::from(record.title.clone()),
        Line::from(""),
        Line::styled("body", label),
    ];
    lines.extend(record.body.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Enter/e: edit   y: copy JSON",
        Style::default().fg(theme.muted),
    ));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(p, area);
}

/// Render the editor for record `id`
pub fn render_editor(
    f: &mut Frame,
    area: Rect,
    id: RecordId,
    title: &TextInput,
    body: &TextInput,
    field: EditField,
    theme: &Theme,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.editing))
        .title(format!(" Editing #{} ", id))
        .style(theme.base());
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    render_field(f, chunks[0], "title", title, field == EditField::Title, theme);
    render_field(f, chunks[1], "body", body, field == EditField::Body, theme);

    let hint = Paragraph::new("Tab: switch field   Enter: save   Esc: cancel")
        .style(Style::default().fg(theme.muted));
    f.render_widget(hint, chunks[2]);
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    input: &TextInput,
    focused: bool,
    theme: &Theme,
) {
    let counter = match input.max_len() {
        Some(max) => format!(" {}/{} ", input.char_count(), max),
        None => String::new(),
    };
    let empty = input.value().trim().is_empty();
    let border = if empty {
        theme.error
    } else {
        theme.panel_border(focused)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", label))
        .title_bottom(Line::from(counter).right_aligned());

    let p = Paragraph::new(input.line(theme, focused))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_toggle() {
        assert_eq!(EditField::Title.toggle(), EditField::Body);
        assert_eq!(EditField::Body.toggle(), EditField::Title);
    }
}
