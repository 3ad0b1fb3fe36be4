// Search bar component
//
// Top row: app title and source on the left, the title search box on the
// right. The box is highlighted while search mode has focus.

use super::text_input::TextInput;
use super::RenderContext;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    f: &mut Frame,
    area: Rect,
    source: &str,
    search: &TextInput,
    ctx: &RenderContext<'_>,
) {
    let theme = ctx.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " posttable ",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(source.to_string(), Style::default().fg(theme.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border)),
    )
    .style(theme.base());
    f.render_widget(title, chunks[0]);

    let content = if search.value().is_empty() && !ctx.focused {
        Line::styled("press / to search titles", Style::default().fg(theme.muted))
    } else {
        search.line(theme, ctx.focused)
    };
    let search_box = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.panel_border(ctx.focused)))
                .title(" Search "),
        )
        .style(theme.base());
    f.render_widget(search_box, chunks[1]);
}
